use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::dto::{MessageResponse, UserResponse};
use crate::api::errors::ApiError;
use crate::api::extract::ValidatedJson;
use crate::api::state::AppState;
use crate::domain::accounts::SignupInput;

/// Request body for user signup
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 2, max = 30))]
    pub first_name: String,
    #[validate(length(min = 2, max = 30))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
    #[validate(length(min = 1))]
    pub phone: String,
}

/// Request body for user login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Response from successful login
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub refresh_token: String,
    #[serde(rename = "InsertedID")]
    pub inserted_id: String,
    pub user: UserResponse,
}

/// Register a new user
///
/// POST /users/signup
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SignupRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    state
        .accounts
        .sign_up(SignupInput {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            password: req.password,
            phone: req.phone,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("user created successfully")),
    ))
}

/// Login with email and password
///
/// POST /users/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let session = state.accounts.login(&req.email, &req.password).await?;

    Ok(Json(LoginResponse {
        token: session.tokens.token,
        refresh_token: session.tokens.refresh_token,
        inserted_id: session.user.user_id.clone(),
        user: session.user.into(),
    }))
}

/// Health check endpoint
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}
