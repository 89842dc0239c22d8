use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::auth::jwt::Claims;

/// Header carrying the access token as issued at login
pub const TOKEN_HEADER: &str = "token";

/// Token authentication extractor for protected routes
///
/// Accepts the raw token in a `token` header, or `Authorization: Bearer <token>`.
///
/// Usage:
/// ```rust,ignore
/// async fn protected_handler(
///     AuthUser(claims): AuthUser,
/// ) -> Result<String, ApiError> {
///     Ok(format!("Hello {}", claims.email))
/// }
/// ```
pub struct AuthUser(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts)
            .ok_or_else(|| ApiError::unauthorized("No Authorization Header Provided"))?;

        let state = AppState::from_ref(state);
        let claims = state.accounts.authenticate(token)?;

        Ok(AuthUser(claims))
    }
}

fn extract_token(parts: &Parts) -> Option<&str> {
    header_value(parts, TOKEN_HEADER)
        .or_else(|| header_value(parts, AUTHORIZATION.as_str())?.strip_prefix("Bearer "))
}

fn header_value<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(headers: &[(&str, &str)]) -> Parts {
        let mut builder = Request::builder().uri("/listcart");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn reads_token_header() {
        let parts = parts(&[("token", "abc")]);
        assert_eq!(extract_token(&parts), Some("abc"));
    }

    #[test]
    fn falls_back_to_bearer() {
        let parts = parts(&[("authorization", "Bearer xyz")]);
        assert_eq!(extract_token(&parts), Some("xyz"));
    }

    #[test]
    fn rejects_missing_or_non_bearer() {
        assert_eq!(extract_token(&parts(&[])), None);
        assert_eq!(extract_token(&parts(&[("authorization", "Basic xyz")])), None);
        assert_eq!(extract_token(&parts(&[("token", "  ")])), None);
    }
}
