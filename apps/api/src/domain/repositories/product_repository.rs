use async_trait::async_trait;
use bson::oid::ObjectId;

use crate::domain::errors::StoreResult;
use crate::domain::product::Product;

/// Repository trait for the `Products` collection
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn insert(&self, product: &Product) -> StoreResult<ObjectId>;

    /// Every product in the catalog
    async fn find_all(&self) -> StoreResult<Vec<Product>>;

    /// All products whose `_id` equals `id`
    async fn find_matching(&self, id: ObjectId) -> StoreResult<Vec<Product>>;

    async fn find_by_id(&self, id: ObjectId) -> StoreResult<Option<Product>>;

    /// Products whose name matches the regular expression `pattern`
    async fn search_by_name(&self, pattern: &str) -> StoreResult<Vec<Product>>;
}
