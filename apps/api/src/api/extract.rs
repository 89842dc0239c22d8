//! Request body extractor that validates after deserializing
//!
//! `ValidatedJson<T>` behaves like `axum::Json<T>` and then runs
//! `validator::Validate::validate()`. Malformed JSON is a 400, field
//! validation failures a 422.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::api::errors::ApiError;

pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| {
                ApiError::bad_request(format!("Invalid JSON: {}", rejection.body_text()))
            })?;

        value
            .validate()
            .map_err(|errors| ApiError::unprocessable(describe(&errors)))?;

        Ok(ValidatedJson(value))
    }
}

/// Flattens field errors into `field: message; field: message`
fn describe(errors: &ValidationErrors) -> String {
    let mut field_errors: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let msg = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{}: {}", field, msg)
            })
        })
        .collect();
    field_errors.sort();

    if field_errors.is_empty() {
        "Validation failed".to_string()
    } else {
        field_errors.join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Debug, Deserialize, Validate)]
    struct Greeting {
        #[validate(length(min = 1, message = "required"))]
        name: String,
    }

    async fn handler(ValidatedJson(greeting): ValidatedJson<Greeting>) -> String {
        greeting.name
    }

    async fn post_body(body: &'static str) -> StatusCode {
        let app = Router::new().route("/greeting", post(handler));
        app.oneshot(
            Request::builder()
                .method("POST")
                .uri("/greeting")
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
        .status()
    }

    #[tokio::test]
    async fn accepts_valid_body() {
        assert_eq!(post_body(r#"{"name":"pen"}"#).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        assert_eq!(post_body("{not json").await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn failed_validation_is_unprocessable() {
        assert_eq!(post_body(r#"{"name":""}"#).await, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
