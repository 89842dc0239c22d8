//! Integration tests for the MongoDB repositories
//!
//! These tests verify that the adapters issue the right pipelines and
//! update operators against a real server: cart totals, duplicate removal,
//! order-line targeting, token upserts and address slots. Each test works
//! in its own throwaway database.
//!
//! Run with `MONGODB_URI` set and `cargo test -- --ignored`.

use bson::doc;
use bson::oid::ObjectId;
use chrono::Utc;
use mongodb::Database;
use storefront_api::domain::cart::{CartLine, CartTotal, Order, TotalSource};
use storefront_api::domain::errors::StoreError;
use storefront_api::domain::product::{NewProduct, Product};
use storefront_api::domain::repositories::{ProductRepository, UserRepository};
use storefront_api::domain::user::{
    Address, AddressFields, AddressSlot, Email, NewUser, Phone, User, MAX_ADDRESSES,
};
use storefront_api::infrastructure::database::{self, USERS_COLLECTION};
use storefront_api::infrastructure::repositories::{MongoProductRepository, MongoUserRepository};

/// Set up a fresh database on the server named by `MONGODB_URI`
async fn setup_test_db() -> Database {
    let uri = std::env::var("MONGODB_URI")
        .expect("MONGODB_URI must be set for integration tests");
    let name = format!("storefront_test_{}", ObjectId::new().to_hex());

    let db = database::connect(&uri, &name)
        .await
        .expect("Failed to connect to test database");
    database::ensure_indexes(&db)
        .await
        .expect("Failed to create indexes");
    db
}

/// Drop the test database
async fn cleanup_test_db(db: Database) {
    db.drop(None).await.expect("Failed to drop test database");
}

/// Insert a user with empty cart, addresses and orders
async fn create_test_user(repo: &MongoUserRepository, email: &str, phone: &str) -> User {
    let user = User::register(
        NewUser {
            first_name: "Test".into(),
            last_name: "User".into(),
            email: Email::new(email).unwrap(),
            phone: Phone::new(phone).unwrap(),
            password_hash: "hash".into(),
        },
        ObjectId::new(),
        "token".into(),
        "refresh".into(),
    );
    repo.insert(&user).await.expect("Failed to create user");
    user
}

fn line(name: &str, price: u32) -> CartLine {
    CartLine::from(Product::create(NewProduct {
        name: name.to_string(),
        price,
        rating: 0,
        image: String::new(),
    }))
}

fn fields(house: &str) -> AddressFields {
    AddressFields {
        house: house.into(),
        street: "Main St".into(),
        city: "Leeds".into(),
        pincode: "LS1".into(),
    }
}

#[tokio::test]
#[ignore = "requires a MongoDB server at MONGODB_URI"]
async fn test_cart_total_matches_manual_sum() {
    let db = setup_test_db().await;
    let repo = MongoUserRepository::new(&db);
    let user = create_test_user(&repo, "total@test.com", "0550000001").await;

    // Empty cart: the pipeline yields no group document
    let empty = repo.aggregate_cart_total(user.id).await.unwrap();
    assert_eq!(empty, None);
    let cart = repo.find_cart(user.id).await.unwrap().unwrap();
    assert_eq!(CartTotal::resolve(empty, &cart).value, 0);

    let lines = vec![line("Mouse", 500), line("Keyboard", 750)];
    assert_eq!(repo.push_cart_lines(user.id, &lines).await.unwrap(), 1);

    let aggregated = repo.aggregate_cart_total(user.id).await.unwrap();
    let cart = repo.find_cart(user.id).await.unwrap().unwrap();
    let total = CartTotal::resolve(aggregated, &cart);
    assert_eq!(total.value, 1250);
    assert_eq!(total.source, TotalSource::Aggregated);

    // Other users' carts stay out of the total
    let other = create_test_user(&repo, "other@test.com", "0550000002").await;
    repo.push_cart_lines(other.id, &[line("Desk", 900)]).await.unwrap();
    let aggregated = repo.aggregate_cart_total(user.id).await.unwrap();
    assert_eq!(CartTotal::resolve(aggregated, &cart).value, 1250);

    cleanup_test_db(db).await;
}

#[tokio::test]
#[ignore = "requires a MongoDB server at MONGODB_URI"]
async fn test_pull_removes_every_duplicate() {
    let db = setup_test_db().await;
    let repo = MongoUserRepository::new(&db);
    let user = create_test_user(&repo, "pull@test.com", "0550000003").await;

    let pen = line("Pen", 120);
    let mug = line("Mug", 300);
    repo.push_cart_lines(user.id, &[pen.clone(), mug.clone(), pen.clone()])
        .await
        .unwrap();

    assert_eq!(repo.pull_cart_lines(user.id, pen.product_id).await.unwrap(), 1);

    let cart = repo.find_cart(user.id).await.unwrap().unwrap();
    assert_eq!(cart, vec![mug]);

    // Unknown user matches nothing
    assert_eq!(
        repo.pull_cart_lines(ObjectId::new(), pen.product_id)
            .await
            .unwrap(),
        0
    );

    cleanup_test_db(db).await;
}

#[tokio::test]
#[ignore = "requires a MongoDB server at MONGODB_URI"]
async fn test_order_lines_fill_only_the_target_order() {
    let db = setup_test_db().await;
    let repo = MongoUserRepository::new(&db);
    let user = create_test_user(&repo, "orders@test.com", "0550000004").await;

    let first = Order::header(500);
    let second = Order::header(750);
    assert_eq!(repo.push_order(user.id, &first).await.unwrap(), 1);
    assert_eq!(repo.push_order(user.id, &second).await.unwrap(), 1);

    let lines = vec![line("Keyboard", 750)];
    assert_eq!(
        repo.push_order_lines(user.id, second.order_id, &lines)
            .await
            .unwrap(),
        1
    );

    let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.orders.len(), 2);
    assert!(stored.orders[0].order_list.is_empty());
    assert_eq!(stored.orders[1].order_list, lines);

    // A missing order header matches nothing
    assert_eq!(
        repo.push_order_lines(user.id, ObjectId::new(), &lines)
            .await
            .unwrap(),
        0
    );

    assert_eq!(repo.clear_cart(user.id).await.unwrap(), 1);

    cleanup_test_db(db).await;
}

#[tokio::test]
#[ignore = "requires a MongoDB server at MONGODB_URI"]
async fn test_tokens_upsert_by_user_id() {
    let db = setup_test_db().await;
    let repo = MongoUserRepository::new(&db);
    let user = create_test_user(&repo, "tokens@test.com", "0550000005").await;

    repo.update_tokens(&user.user_id, "fresh-token", "fresh-refresh", Utc::now())
        .await
        .unwrap();

    let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.token.as_deref(), Some("fresh-token"));
    assert_eq!(stored.refresh_token.as_deref(), Some("fresh-refresh"));

    repo.update_tokens("unknown-user", "t", "r", Utc::now())
        .await
        .unwrap();
    let upserted = db
        .collection::<bson::Document>(USERS_COLLECTION)
        .count_documents(doc! { "user_id": "unknown-user" }, None)
        .await
        .unwrap();
    assert_eq!(upserted, 1);

    cleanup_test_db(db).await;
}

#[tokio::test]
#[ignore = "requires a MongoDB server at MONGODB_URI"]
async fn test_address_slots_and_limit() {
    let db = setup_test_db().await;
    let repo = MongoUserRepository::new(&db);
    let user = create_test_user(&repo, "address@test.com", "0550000006").await;

    // Editing an empty slot matches nothing and does not pad the array
    assert_eq!(
        repo.set_address_slot(user.id, AddressSlot::Home, &fields("Manor"))
            .await
            .unwrap(),
        0
    );
    assert_eq!(repo.count_addresses(user.id).await.unwrap(), Some(0));

    let work = Address::new(fields("Office"));
    assert_eq!(repo.push_address(user.id, &work).await.unwrap(), 1);
    assert_eq!(
        repo.set_address_slot(user.id, AddressSlot::Home, &fields("Manor"))
            .await
            .unwrap(),
        0
    );
    assert_eq!(
        repo.set_address_slot(user.id, AddressSlot::Work, &fields("Tower"))
            .await
            .unwrap(),
        1
    );

    let home = Address::new(fields("Cottage"));
    assert_eq!(repo.push_address(user.id, &home).await.unwrap(), 1);

    // The limit is enforced by the write itself
    let third = Address::new(fields("Third"));
    assert_eq!(repo.push_address(user.id, &third).await.unwrap(), 0);
    assert_eq!(
        repo.count_addresses(user.id).await.unwrap(),
        Some(MAX_ADDRESSES)
    );

    let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.addresses[0].id, work.id);
    assert_eq!(stored.addresses[0].house, "Tower");
    assert_eq!(stored.addresses[1].house, "Cottage");

    assert_eq!(repo.clear_addresses(user.id).await.unwrap(), 1);
    assert_eq!(repo.count_addresses(user.id).await.unwrap(), Some(0));

    cleanup_test_db(db).await;
}

#[tokio::test]
#[ignore = "requires a MongoDB server at MONGODB_URI"]
async fn test_product_search_uses_server_regex() {
    let db = setup_test_db().await;
    let repo = MongoProductRepository::new(&db);

    for (name, price) in [("Alienware x15", 2500), ("iPhone 13", 900)] {
        repo.insert(&Product::create(NewProduct {
            name: name.to_string(),
            price,
            rating: 4,
            image: String::new(),
        }))
        .await
        .unwrap();
    }

    let found = repo.search_by_name("(?=Alien)").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Alienware x15");

    let found = repo.search_by_name("(i)Phone \\d+").await.unwrap();
    assert_eq!(found.len(), 1);

    // Backreferences compile server-side even when nothing matches
    assert!(repo.search_by_name("(a)\\1").await.unwrap().is_empty());

    assert!(matches!(
        repo.search_by_name("(").await,
        Err(StoreError::InvalidQuery(_))
    ));

    assert_eq!(repo.find_all().await.unwrap().len(), 2);

    cleanup_test_db(db).await;
}
