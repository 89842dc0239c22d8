use std::sync::Arc;

use bson::oid::ObjectId;
use tracing::{info, warn};

use super::line::CartLine;
use super::order::Order;
use super::totals::{CartSummary, CartTotal};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ids::parse_object_id;
use crate::domain::repositories::{ProductRepository, UserRepository};
use crate::domain::timeouts::{bounded, OperationTimeouts};

/// Cart and order operations over the user and product collections
///
/// Every operation is a short sequence of single-document writes. Nothing
/// here runs inside a multi-document transaction: the store guarantees
/// atomicity per update only, and a failed step leaves earlier steps
/// applied.
#[derive(Clone)]
pub struct CartEngine {
    users: Arc<dyn UserRepository>,
    products: Arc<dyn ProductRepository>,
    timeouts: OperationTimeouts,
}

impl CartEngine {
    pub fn new(
        users: Arc<dyn UserRepository>,
        products: Arc<dyn ProductRepository>,
        timeouts: OperationTimeouts,
    ) -> Self {
        Self {
            users,
            products,
            timeouts,
        }
    }

    /// Appends snapshots of every product matching `product_id` to the cart
    ///
    /// Repeated adds create duplicate lines; quantities are never merged.
    pub async fn add_to_cart(&self, product_id: ObjectId, user_id: &str) -> DomainResult<()> {
        let user_id = parse_object_id(user_id, "user id")?;

        bounded(self.timeouts.short, "add_to_cart", async {
            let products = self.products.find_matching(product_id).await?;
            if products.is_empty() {
                return Err(DomainError::ProductNotFound);
            }

            let lines: Vec<CartLine> = products.into_iter().map(CartLine::from).collect();
            let matched = self.users.push_cart_lines(user_id, &lines).await?;
            if matched == 0 {
                return Err(DomainError::UserNotFound);
            }

            info!(user = %user_id, product = %product_id, lines = lines.len(), "added product to cart");
            Ok(())
        })
        .await
    }

    /// Removes every cart line for `product_id`, not just one
    pub async fn remove_from_cart(&self, product_id: ObjectId, user_id: &str) -> DomainResult<()> {
        let user_id = parse_object_id(user_id, "user id")?;

        bounded(self.timeouts.short, "remove_from_cart", async {
            let matched = self.users.pull_cart_lines(user_id, product_id).await?;
            if matched == 0 {
                return Err(DomainError::UserNotFound);
            }

            info!(user = %user_id, product = %product_id, "removed product from cart");
            Ok(())
        })
        .await
    }

    /// Cart lines, their total and count
    pub async fn cart_summary(&self, user_id: &str) -> DomainResult<CartSummary> {
        let user_id = parse_object_id(user_id, "user id")?;

        bounded(self.timeouts.long, "list_cart", async {
            let (lines, total) = self.compute_total(user_id).await?;
            Ok(CartSummary {
                count: lines.len(),
                total: total.value,
                lines,
            })
        })
        .await
    }

    /// Turns the cart into an order and empties the cart
    ///
    /// Steps, each a separate write:
    /// 1. total the cart (aggregation, falling back to a manual sum)
    /// 2. push the order header carrying that total
    /// 3. re-read the cart and push its lines into the new order
    /// 4. replace the cart with an empty array
    ///
    /// The cart is read twice, so a concurrent add between steps 1 and 3
    /// yields an order whose lines do not add up to its price. An empty
    /// cart produces a zero-price order.
    pub async fn checkout(&self, user_id: &str) -> DomainResult<Order> {
        let user_id = parse_object_id(user_id, "user id")?;

        bounded(self.timeouts.long, "checkout", async {
            let (_, total) = self.compute_total(user_id).await?;
            if total.value == 0 {
                warn!(user = %user_id, "checking out an empty cart");
            }

            let mut order = Order::header(total.value);
            if self.users.push_order(user_id, &order).await? == 0 {
                return Err(DomainError::UserNotFound);
            }

            let lines = self
                .users
                .find_cart(user_id)
                .await?
                .ok_or(DomainError::UserNotFound)?;
            if !lines.is_empty() {
                let filled = self
                    .users
                    .push_order_lines(user_id, order.order_id, &lines)
                    .await?;
                ensure_lines_stored(filled, user_id, order.order_id)?;
            }

            let cleared = self.users.clear_cart(user_id).await.map_err(|err| {
                tracing::error!(user = %user_id, error = %err, "failed to clear cart after checkout");
                DomainError::CheckoutFailure
            })?;
            if cleared == 0 {
                return Err(DomainError::CheckoutFailure);
            }

            order.order_list = lines;
            info!(
                user = %user_id,
                order = %order.order_id,
                price = order.price,
                lines = order.order_list.len(),
                "placed order from cart"
            );
            Ok(order)
        })
        .await
    }

    /// Orders a single product without touching the cart
    pub async fn instant_buy(&self, product_id: ObjectId, user_id: &str) -> DomainResult<Order> {
        let user_id = parse_object_id(user_id, "user id")?;

        bounded(self.timeouts.short, "instant_buy", async {
            let product = self
                .products
                .find_by_id(product_id)
                .await?
                .ok_or(DomainError::ProductNotFound)?;

            let line = CartLine::from(product);
            let mut order = Order::header(u64::from(line.price));
            if self.users.push_order(user_id, &order).await? == 0 {
                return Err(DomainError::UserNotFound);
            }
            let filled = self
                .users
                .push_order_lines(user_id, order.order_id, std::slice::from_ref(&line))
                .await?;
            ensure_lines_stored(filled, user_id, order.order_id)?;

            order.order_list.push(line);
            info!(user = %user_id, order = %order.order_id, price = order.price, "placed instant order");
            Ok(order)
        })
        .await
    }

    async fn compute_total(&self, user_id: ObjectId) -> DomainResult<(Vec<CartLine>, CartTotal)> {
        let lines = self
            .users
            .find_cart(user_id)
            .await?
            .ok_or(DomainError::UserNotFound)?;
        let aggregated = self.users.aggregate_cart_total(user_id).await?;
        let total = CartTotal::resolve(aggregated, &lines);
        Ok((lines, total))
    }
}

/// Fails when the lines update matched no order header
///
/// The header stays in the order history without lines; nothing is rolled
/// back.
fn ensure_lines_stored(matched: u64, user_id: ObjectId, order_id: ObjectId) -> DomainResult<()> {
    if matched == 0 {
        warn!(user = %user_id, order = %order_id, "order header missing, lines not stored");
        return Err(DomainError::Persistence("order lines were not stored".to_string()));
    }
    Ok(())
}
