use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use tracing::debug;

use crate::api::dto::{CartResponse, MessageResponse, OrderResponse};
use crate::api::errors::ApiError;
use crate::api::middleware::AuthUser;
use crate::api::state::AppState;
use crate::domain::ids::parse_object_id;

/// Query for operations on one product in one user's cart
#[derive(Debug, Deserialize)]
pub struct ProductUserQuery {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "userID", default)]
    pub user_id: String,
}

/// Query naming a user
#[derive(Debug, Deserialize)]
pub struct UserQuery {
    #[serde(default)]
    pub id: String,
}

/// Add a product to the cart
///
/// GET /addtocart?id=<product>&userID=<user>
pub async fn add_to_cart(
    AuthUser(claims): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ProductUserQuery>,
) -> Result<Json<MessageResponse>, ApiError> {
    let product_id = parse_object_id(&query.id, "product id")?;
    debug!(caller = %claims.uid, "add to cart");

    state.cart.add_to_cart(product_id, &query.user_id).await?;
    Ok(Json(MessageResponse::new("product added to cart")))
}

/// Remove every line of a product from the cart
///
/// GET /removeitem?id=<product>&userID=<user>
pub async fn remove_item(
    AuthUser(claims): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ProductUserQuery>,
) -> Result<Json<MessageResponse>, ApiError> {
    let product_id = parse_object_id(&query.id, "product id")?;
    debug!(caller = %claims.uid, "remove from cart");

    state.cart.remove_from_cart(product_id, &query.user_id).await?;
    Ok(Json(MessageResponse::new("item removed from cart")))
}

/// List the cart with its total
///
/// GET /listcart?id=<user>
pub async fn list_cart(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<CartResponse>, ApiError> {
    let summary = state.cart.cart_summary(&query.id).await?;
    Ok(Json(summary.into()))
}

/// Turn the cart into an order
///
/// GET /cartcheckout?id=<user>
pub async fn checkout(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order = state.cart.checkout(&query.id).await?;
    Ok(Json(order.into()))
}

/// Order a single product directly
///
/// GET /instantbuy?id=<product>&userID=<user>
pub async fn instant_buy(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ProductUserQuery>,
) -> Result<Json<OrderResponse>, ApiError> {
    let product_id = parse_object_id(&query.id, "product id")?;

    let order = state.cart.instant_buy(product_id, &query.user_id).await?;
    Ok(Json(order.into()))
}
