use async_trait::async_trait;
use bson::doc;
use bson::oid::ObjectId;
use futures::TryStreamExt;
use mongodb::error::{Error as MongoError, ErrorKind};
use mongodb::{Collection, Database};

use crate::domain::errors::{StoreError, StoreResult};
use crate::domain::product::Product;
use crate::domain::repositories::ProductRepository;
use crate::infrastructure::database::PRODUCTS_COLLECTION;

/// Server error code for a `$regex` pattern that fails to compile
const INVALID_REGEX_CODE: i32 = 51091;

/// MongoDB implementation of ProductRepository
pub struct MongoProductRepository {
    products: Collection<Product>,
}

impl MongoProductRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            products: database.collection(PRODUCTS_COLLECTION),
        }
    }

    async fn find_many(&self, filter: bson::Document, context: &str) -> StoreResult<Vec<Product>> {
        let cursor = self
            .products
            .find(filter, None)
            .await
            .map_err(|e| classify(e, context))?;

        cursor.try_collect().await.map_err(|e| classify(e, context))
    }
}

/// Rejected `$regex` patterns are the caller's fault; anything else is a
/// database failure
fn classify(err: MongoError, context: &str) -> StoreError {
    match err.kind.as_ref() {
        ErrorKind::Command(command)
            if command.code == INVALID_REGEX_CODE
                || command.message.starts_with("Regular expression is invalid") =>
        {
            StoreError::InvalidQuery(command.message.clone())
        }
        _ => StoreError::Database(format!("{}: {}", context, err)),
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    async fn insert(&self, product: &Product) -> StoreResult<ObjectId> {
        self.products
            .insert_one(product, None)
            .await
            .map_err(|e| StoreError::Database(format!("Failed to create product: {}", e)))?;

        Ok(product.id)
    }

    async fn find_all(&self) -> StoreResult<Vec<Product>> {
        self.find_many(doc! {}, "Failed to list products").await
    }

    async fn find_matching(&self, id: ObjectId) -> StoreResult<Vec<Product>> {
        self.find_many(doc! { "_id": id }, "Failed to find product").await
    }

    async fn find_by_id(&self, id: ObjectId) -> StoreResult<Option<Product>> {
        self.products
            .find_one(doc! { "_id": id }, None)
            .await
            .map_err(|e| StoreError::Database(format!("Failed to find product by id: {}", e)))
    }

    async fn search_by_name(&self, pattern: &str) -> StoreResult<Vec<Product>> {
        self.find_many(
            doc! { "product_name": { "$regex": pattern } },
            "Failed to search products",
        )
        .await
    }
}
