use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::api::dto::{AddressResponse, MessageResponse};
use crate::api::errors::ApiError;
use crate::api::extract::ValidatedJson;
use crate::api::handlers::cart::UserQuery;
use crate::api::middleware::AuthUser;
use crate::api::state::AppState;
use crate::domain::user::{AddressFields, AddressSlot};

/// Request body for adding or editing an address
#[derive(Debug, Deserialize, Validate)]
pub struct AddressRequest {
    #[validate(length(min = 1))]
    pub house_name: String,
    #[validate(length(min = 1))]
    pub street_name: String,
    #[validate(length(min = 1))]
    pub city_name: String,
    #[validate(length(min = 1))]
    pub pin_code: String,
}

impl From<AddressRequest> for AddressFields {
    fn from(req: AddressRequest) -> Self {
        Self {
            house: req.house_name,
            street: req.street_name,
            city: req.city_name,
            pincode: req.pin_code,
        }
    }
}

/// Add an address, up to two per user
///
/// POST /addaddress?id=<user>
pub async fn add_address(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
    ValidatedJson(req): ValidatedJson<AddressRequest>,
) -> Result<Json<AddressResponse>, ApiError> {
    let address = state.addresses.add(&query.id, req.into()).await?;
    Ok(Json(address.into()))
}

/// Overwrite the home address
///
/// PUT /edithomeaddress?id=<user>
pub async fn edit_home_address(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
    ValidatedJson(req): ValidatedJson<AddressRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .addresses
        .edit(&query.id, AddressSlot::Home, req.into())
        .await?;
    Ok(Json(MessageResponse::new("Successfully updated the home address")))
}

/// Overwrite the work address
///
/// PUT /editworkaddress?id=<user>
pub async fn edit_work_address(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
    ValidatedJson(req): ValidatedJson<AddressRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .addresses
        .edit(&query.id, AddressSlot::Work, req.into())
        .await?;
    Ok(Json(MessageResponse::new("Successfully updated the work address")))
}

/// Delete every address
///
/// GET /deleteaddresses?id=<user>
pub async fn delete_addresses(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.addresses.delete_all(&query.id).await?;
    Ok(Json(MessageResponse::new("Successfully Deleted")))
}
