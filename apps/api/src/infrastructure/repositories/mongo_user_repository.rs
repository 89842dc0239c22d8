use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{doc, Bson, Document};
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::options::{FindOneOptions, UpdateOptions};
use mongodb::{Collection, Database};
use serde::Deserialize;

use crate::domain::cart::{CartLine, Order};
use crate::domain::errors::{StoreError, StoreResult};
use crate::domain::repositories::UserRepository;
use crate::domain::user::{
    Address, AddressFields, AddressSlot, Email, Phone, User, MAX_ADDRESSES,
};
use crate::infrastructure::database::USERS_COLLECTION;

#[derive(Debug, Deserialize)]
struct CartProjection {
    #[serde(rename = "usercart", default)]
    cart: Vec<CartLine>,
}

#[derive(Debug, Deserialize)]
struct AddressProjection {
    #[serde(rename = "address", default)]
    addresses: Vec<Address>,
}

/// MongoDB implementation of UserRepository
pub struct MongoUserRepository {
    users: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            users: database.collection(USERS_COLLECTION),
        }
    }

    async fn update_one(&self, filter: Document, update: Document, context: &str) -> StoreResult<u64> {
        let result = self
            .users
            .update_one(filter, update, None)
            .await
            .map_err(|e| StoreError::Database(format!("{}: {}", context, e)))?;
        Ok(result.matched_count)
    }
}

fn encode<T: serde::Serialize + ?Sized>(value: &T) -> StoreResult<Bson> {
    bson::to_bson(value).map_err(|e| StoreError::Codec(e.to_string()))
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn insert(&self, user: &User) -> StoreResult<ObjectId> {
        let result = self
            .users
            .insert_one(user, None)
            .await
            .map_err(|e| StoreError::Database(format!("Failed to create user: {}", e)))?;

        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::Codec("inserted id is not an ObjectId".to_string()))
    }

    async fn find_by_id(&self, id: ObjectId) -> StoreResult<Option<User>> {
        self.users
            .find_one(doc! { "_id": id }, None)
            .await
            .map_err(|e| StoreError::Database(format!("Failed to find user by id: {}", e)))
    }

    async fn find_by_email(&self, email: &Email) -> StoreResult<Option<User>> {
        self.users
            .find_one(doc! { "email": email.as_str() }, None)
            .await
            .map_err(|e| StoreError::Database(format!("Failed to find user by email: {}", e)))
    }

    async fn count_by_email(&self, email: &Email) -> StoreResult<u64> {
        self.users
            .count_documents(doc! { "email": email.as_str() }, None)
            .await
            .map_err(|e| StoreError::Database(format!("Failed to count users by email: {}", e)))
    }

    async fn count_by_phone(&self, phone: &Phone) -> StoreResult<u64> {
        self.users
            .count_documents(doc! { "phone": phone.as_str() }, None)
            .await
            .map_err(|e| StoreError::Database(format!("Failed to count users by phone: {}", e)))
    }

    async fn update_tokens(
        &self,
        user_id: &str,
        token: &str,
        refresh_token: &str,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<()> {
        let update = doc! {
            "$set": {
                "token": token,
                "refresh_token": refresh_token,
                "updated_at": bson::DateTime::from_chrono(updated_at),
            }
        };
        let options = UpdateOptions::builder().upsert(true).build();

        self.users
            .update_one(doc! { "user_id": user_id }, update, options)
            .await
            .map_err(|e| StoreError::Database(format!("Failed to update tokens: {}", e)))?;

        Ok(())
    }

    async fn find_cart(&self, id: ObjectId) -> StoreResult<Option<Vec<CartLine>>> {
        let options = FindOneOptions::builder()
            .projection(doc! { "usercart": 1 })
            .build();

        let found = self
            .users
            .clone_with_type::<CartProjection>()
            .find_one(doc! { "_id": id }, options)
            .await
            .map_err(|e| StoreError::Database(format!("Failed to load cart: {}", e)))?;

        Ok(found.map(|projection| projection.cart))
    }

    async fn aggregate_cart_total(&self, id: ObjectId) -> StoreResult<Option<Bson>> {
        let pipeline = vec![
            doc! { "$match": { "_id": id } },
            doc! { "$unwind": { "path": "$usercart" } },
            doc! { "$group": { "_id": "$_id", "total": { "$sum": "$usercart.price" } } },
        ];

        let mut cursor = self
            .users
            .aggregate(pipeline, None)
            .await
            .map_err(|e| StoreError::Database(format!("Failed to aggregate cart: {}", e)))?;

        let group = cursor
            .try_next()
            .await
            .map_err(|e| StoreError::Database(format!("Failed to read cart aggregate: {}", e)))?;

        Ok(group.and_then(|mut document| document.remove("total")))
    }

    async fn push_cart_lines(&self, id: ObjectId, lines: &[CartLine]) -> StoreResult<u64> {
        let lines = encode(lines)?;
        let update = doc! { "$push": { "usercart": { "$each": lines } } };
        self.update_one(doc! { "_id": id }, update, "Failed to add to cart")
            .await
    }

    async fn pull_cart_lines(&self, id: ObjectId, product_id: ObjectId) -> StoreResult<u64> {
        let result = self
            .users
            .update_many(
                doc! { "_id": id },
                doc! { "$pull": { "usercart": { "_id": product_id } } },
                None,
            )
            .await
            .map_err(|e| StoreError::Database(format!("Failed to remove from cart: {}", e)))?;

        Ok(result.matched_count)
    }

    async fn clear_cart(&self, id: ObjectId) -> StoreResult<u64> {
        self.update_one(
            doc! { "_id": id },
            doc! { "$set": { "usercart": [] } },
            "Failed to clear cart",
        )
        .await
    }

    async fn push_order(&self, id: ObjectId, order: &Order) -> StoreResult<u64> {
        let order = encode(order)?;
        let update = doc! { "$push": { "orders": order } };
        self.update_one(doc! { "_id": id }, update, "Failed to append order")
            .await
    }

    async fn push_order_lines(
        &self,
        id: ObjectId,
        order_id: ObjectId,
        lines: &[CartLine],
    ) -> StoreResult<u64> {
        let filter = doc! { "_id": id, "orders._id": order_id };
        let lines = encode(lines)?;
        let update = doc! { "$push": { "orders.$.order_list": { "$each": lines } } };
        self.update_one(filter, update, "Failed to fill order lines")
            .await
    }

    async fn count_addresses(&self, id: ObjectId) -> StoreResult<Option<usize>> {
        let options = FindOneOptions::builder()
            .projection(doc! { "address": 1 })
            .build();

        let found = self
            .users
            .clone_with_type::<AddressProjection>()
            .find_one(doc! { "_id": id }, options)
            .await
            .map_err(|e| StoreError::Database(format!("Failed to load addresses: {}", e)))?;

        Ok(found.map(|projection| projection.addresses.len()))
    }

    async fn push_address(&self, id: ObjectId, address: &Address) -> StoreResult<u64> {
        let address = encode(address)?;
        let mut filter = doc! { "_id": id };
        filter.insert(
            format!("address.{}", MAX_ADDRESSES - 1),
            doc! { "$exists": false },
        );
        let update = doc! { "$push": { "address": address } };
        self.update_one(filter, update, "Failed to add address")
            .await
    }

    async fn set_address_slot(
        &self,
        id: ObjectId,
        slot: AddressSlot,
        fields: &AddressFields,
    ) -> StoreResult<u64> {
        let prefix = format!("address.{}", slot.index());

        let mut filter = doc! { "_id": id };
        filter.insert(prefix.clone(), doc! { "$exists": true });

        let mut set = Document::new();
        set.insert(format!("{}.house_name", prefix), fields.house.as_str());
        set.insert(format!("{}.street_name", prefix), fields.street.as_str());
        set.insert(format!("{}.city_name", prefix), fields.city.as_str());
        set.insert(format!("{}.pin_code", prefix), fields.pincode.as_str());

        self.update_one(filter, doc! { "$set": set }, "Failed to edit address")
            .await
    }

    async fn clear_addresses(&self, id: ObjectId) -> StoreResult<u64> {
        self.update_one(
            doc! { "_id": id },
            doc! { "$set": { "address": [] } },
            "Failed to delete addresses",
        )
        .await
    }
}
