use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::api::dto::ProductResponse;
use crate::api::errors::ApiError;
use crate::api::extract::ValidatedJson;
use crate::api::state::AppState;
use crate::domain::product::NewProduct;

/// Request body for adding a product
#[derive(Debug, Deserialize, Validate)]
pub struct AddProductRequest {
    #[validate(length(min = 1))]
    pub product_name: String,
    pub price: u32,
    #[serde(default)]
    #[validate(range(max = 5))]
    pub rating: u8,
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub name: String,
}

/// Add a product to the catalog
///
/// POST /admin/addproduct
pub async fn add_product(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<AddProductRequest>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state
        .catalog
        .add_product(NewProduct {
            name: req.product_name,
            price: req.price,
            rating: req.rating,
            image: req.image,
        })
        .await?;

    Ok(Json(product.into()))
}

/// List every product
///
/// GET /users/productview
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let products = state.catalog.list().await?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

/// Search products by a name pattern
///
/// GET /users/search?name=
pub async fn search_products(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let products = state.catalog.search(&query.name).await?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}
