//! In-memory document store for development and testing
//!
//! Mirrors the observable behavior of the MongoDB adapters: update methods
//! report matched documents, the cart aggregate yields no value for an
//! empty cart, and name search evaluates a regular expression.

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::Bson;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use regex::Regex;

use crate::domain::cart::{manual_sum, CartLine, Order};
use crate::domain::errors::{StoreError, StoreResult};
use crate::domain::product::Product;
use crate::domain::repositories::{ProductRepository, UserRepository};
use crate::domain::user::{
    Address, AddressFields, AddressSlot, Email, Phone, User, MAX_ADDRESSES,
};

/// In-memory users and products keyed by document id
#[derive(Default)]
pub struct InMemoryStore {
    users: DashMap<ObjectId, User>,
    products: DashMap<ObjectId, Product>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `f` to the user and reports 1 matched document, or 0 if absent
    fn update_user(&self, id: ObjectId, f: impl FnOnce(&mut User)) -> StoreResult<u64> {
        match self.users.get_mut(&id) {
            Some(mut user) => {
                f(user.value_mut());
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, user: &User) -> StoreResult<ObjectId> {
        if self.users.contains_key(&user.id) {
            return Err(StoreError::Database(format!("duplicate key: {}", user.id)));
        }
        self.users.insert(user.id, user.clone());
        Ok(user.id)
    }

    async fn find_by_id(&self, id: ObjectId) -> StoreResult<Option<User>> {
        Ok(self.users.get(&id).map(|user| user.value().clone()))
    }

    async fn find_by_email(&self, email: &Email) -> StoreResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|user| user.email == email.as_str())
            .map(|user| user.value().clone()))
    }

    async fn count_by_email(&self, email: &Email) -> StoreResult<u64> {
        Ok(self.users.iter().filter(|user| user.email == email.as_str()).count() as u64)
    }

    async fn count_by_phone(&self, phone: &Phone) -> StoreResult<u64> {
        Ok(self.users.iter().filter(|user| user.phone == phone.as_str()).count() as u64)
    }

    async fn update_tokens(
        &self,
        user_id: &str,
        token: &str,
        refresh_token: &str,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<()> {
        // A token-only document cannot be represented here, so the upsert
        // of an unknown user_id is a no-op.
        if let Some(mut user) = self.users.iter_mut().find(|user| user.user_id == user_id) {
            user.token = Some(token.to_string());
            user.refresh_token = Some(refresh_token.to_string());
            user.updated_at = updated_at;
        }
        Ok(())
    }

    async fn find_cart(&self, id: ObjectId) -> StoreResult<Option<Vec<CartLine>>> {
        Ok(self.users.get(&id).map(|user| user.cart.clone()))
    }

    async fn aggregate_cart_total(&self, id: ObjectId) -> StoreResult<Option<Bson>> {
        let Some(user) = self.users.get(&id) else {
            return Ok(None);
        };
        if user.cart.is_empty() {
            return Ok(None);
        }
        let total = i64::try_from(manual_sum(&user.cart))
            .map_err(|_| StoreError::Database("cart total overflow".to_string()))?;
        Ok(Some(Bson::Int64(total)))
    }

    async fn push_cart_lines(&self, id: ObjectId, lines: &[CartLine]) -> StoreResult<u64> {
        self.update_user(id, |user| user.cart.extend_from_slice(lines))
    }

    async fn pull_cart_lines(&self, id: ObjectId, product_id: ObjectId) -> StoreResult<u64> {
        self.update_user(id, |user| user.cart.retain(|line| line.product_id != product_id))
    }

    async fn clear_cart(&self, id: ObjectId) -> StoreResult<u64> {
        self.update_user(id, |user| user.cart.clear())
    }

    async fn push_order(&self, id: ObjectId, order: &Order) -> StoreResult<u64> {
        self.update_user(id, |user| user.orders.push(order.clone()))
    }

    async fn push_order_lines(
        &self,
        id: ObjectId,
        order_id: ObjectId,
        lines: &[CartLine],
    ) -> StoreResult<u64> {
        let Some(mut user) = self.users.get_mut(&id) else {
            return Ok(0);
        };
        match user.orders.iter_mut().find(|order| order.order_id == order_id) {
            Some(order) => {
                order.order_list.extend_from_slice(lines);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn count_addresses(&self, id: ObjectId) -> StoreResult<Option<usize>> {
        Ok(self.users.get(&id).map(|user| user.addresses.len()))
    }

    async fn push_address(&self, id: ObjectId, address: &Address) -> StoreResult<u64> {
        let Some(mut user) = self.users.get_mut(&id) else {
            return Ok(0);
        };
        if user.addresses.len() >= MAX_ADDRESSES {
            return Ok(0);
        }
        user.addresses.push(address.clone());
        Ok(1)
    }

    async fn set_address_slot(
        &self,
        id: ObjectId,
        slot: AddressSlot,
        fields: &AddressFields,
    ) -> StoreResult<u64> {
        let Some(mut user) = self.users.get_mut(&id) else {
            return Ok(0);
        };
        match user.addresses.get_mut(slot.index()) {
            Some(address) => {
                address.apply(fields.clone());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn clear_addresses(&self, id: ObjectId) -> StoreResult<u64> {
        self.update_user(id, |user| user.addresses.clear())
    }
}

#[async_trait]
impl ProductRepository for InMemoryStore {
    async fn insert(&self, product: &Product) -> StoreResult<ObjectId> {
        self.products.insert(product.id, product.clone());
        Ok(product.id)
    }

    async fn find_all(&self) -> StoreResult<Vec<Product>> {
        let mut products: Vec<Product> = self.products.iter().map(|p| p.value().clone()).collect();
        products.sort_by_key(|p| p.id);
        Ok(products)
    }

    async fn find_matching(&self, id: ObjectId) -> StoreResult<Vec<Product>> {
        Ok(self.products.get(&id).map(|p| p.value().clone()).into_iter().collect())
    }

    async fn find_by_id(&self, id: ObjectId) -> StoreResult<Option<Product>> {
        Ok(self.products.get(&id).map(|p| p.value().clone()))
    }

    async fn search_by_name(&self, pattern: &str) -> StoreResult<Vec<Product>> {
        let regex = Regex::new(pattern).map_err(|e| StoreError::InvalidQuery(e.to_string()))?;
        let mut products: Vec<Product> = self
            .products
            .iter()
            .filter(|p| regex.is_match(&p.name))
            .map(|p| p.value().clone())
            .collect();
        products.sort_by_key(|p| p.id);
        Ok(products)
    }
}
