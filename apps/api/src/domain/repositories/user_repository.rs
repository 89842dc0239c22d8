use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::Bson;
use chrono::{DateTime, Utc};

use crate::domain::cart::{CartLine, Order};
use crate::domain::errors::StoreResult;
use crate::domain::user::{Address, AddressFields, AddressSlot, Email, Phone, User};

/// Repository trait for the `Users` collection
///
/// Update methods return the number of documents the filter matched, so
/// callers can tell a missing user (0) from a write that changed nothing.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user document
    async fn insert(&self, user: &User) -> StoreResult<ObjectId>;

    /// Find a user by document id
    async fn find_by_id(&self, id: ObjectId) -> StoreResult<Option<User>>;

    /// Find a user by email address
    async fn find_by_email(&self, email: &Email) -> StoreResult<Option<User>>;

    async fn count_by_email(&self, email: &Email) -> StoreResult<u64>;

    async fn count_by_phone(&self, phone: &Phone) -> StoreResult<u64>;

    /// Upsert the latest token pair, keyed by the hex `user_id`
    async fn update_tokens(
        &self,
        user_id: &str,
        token: &str,
        refresh_token: &str,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<()>;

    /// Decoded cart lines, or `None` when the user does not exist
    async fn find_cart(&self, id: ObjectId) -> StoreResult<Option<Vec<CartLine>>>;

    /// Raw `$sum` of cart line prices from the aggregation pipeline
    ///
    /// `None` when the pipeline produced no group document, which is the
    /// case for an empty cart.
    async fn aggregate_cart_total(&self, id: ObjectId) -> StoreResult<Option<Bson>>;

    /// Append lines to the cart
    async fn push_cart_lines(&self, id: ObjectId, lines: &[CartLine]) -> StoreResult<u64>;

    /// Remove every cart line carrying `product_id`
    async fn pull_cart_lines(&self, id: ObjectId, product_id: ObjectId) -> StoreResult<u64>;

    /// Replace the cart with an empty array
    async fn clear_cart(&self, id: ObjectId) -> StoreResult<u64>;

    /// Append an order header to the order history
    async fn push_order(&self, id: ObjectId, order: &Order) -> StoreResult<u64>;

    /// Append lines to the `order_list` of one existing order
    async fn push_order_lines(
        &self,
        id: ObjectId,
        order_id: ObjectId,
        lines: &[CartLine],
    ) -> StoreResult<u64>;

    /// Number of stored addresses, or `None` when the user does not exist
    async fn count_addresses(&self, id: ObjectId) -> StoreResult<Option<usize>>;

    /// Append an address unless the list already holds `MAX_ADDRESSES`
    ///
    /// The limit is part of the write's match condition, so a full list
    /// reports 0 matched.
    async fn push_address(&self, id: ObjectId, address: &Address) -> StoreResult<u64>;

    /// Overwrite the fields of the address held in `slot`
    ///
    /// Matches only when the slot is populated.
    async fn set_address_slot(
        &self,
        id: ObjectId,
        slot: AddressSlot,
        fields: &AddressFields,
    ) -> StoreResult<u64>;

    async fn clear_addresses(&self, id: ObjectId) -> StoreResult<u64>;
}
