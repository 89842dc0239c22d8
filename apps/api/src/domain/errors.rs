use thiserror::Error;

use crate::auth::jwt::TokenError;

/// Failure raised by a document-store adapter.
///
/// Carries the driver's message for logging only; it is never shown to
/// API clients.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(String),

    #[error("document codec error: {0}")]
    Codec(String),

    #[error("invalid query: {0}")]
    InvalidQuery(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by the domain services
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("product not found")]
    ProductNotFound,

    #[error("user not found")]
    UserNotFound,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("token is invalid")]
    TokenInvalid,

    #[error("token has expired")]
    TokenExpired,

    #[error("{0}")]
    Persistence(String),

    #[error("can't buy cart items")]
    CheckoutFailure,

    #[error("configuration error: {0}")]
    Configuration(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        tracing::error!(error = %err, "document store operation failed");
        match err {
            StoreError::InvalidQuery(_) => DomainError::InvalidArgument("invalid query".to_string()),
            _ => DomainError::Persistence("storage operation failed".to_string()),
        }
    }
}

impl From<TokenError> for DomainError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => DomainError::TokenExpired,
            TokenError::InvalidSignature | TokenError::Malformed(_) => DomainError::TokenInvalid,
            TokenError::MissingSecret | TokenError::Signing(_) => {
                DomainError::Configuration(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_hide_driver_text() {
        let err: DomainError = StoreError::Database("E11000 dup key { _id: 1 }".into()).into();
        assert!(matches!(err, DomainError::Persistence(_)));
        assert!(!err.to_string().contains("E11000"));
    }

    #[test]
    fn invalid_query_maps_to_invalid_argument() {
        let err: DomainError = StoreError::InvalidQuery("unclosed group".into()).into();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
    }

    #[test]
    fn token_errors_map_to_auth_kinds() {
        assert!(matches!(DomainError::from(TokenError::Expired), DomainError::TokenExpired));
        assert!(matches!(
            DomainError::from(TokenError::InvalidSignature),
            DomainError::TokenInvalid
        ));
        assert!(matches!(
            DomainError::from(TokenError::MissingSecret),
            DomainError::Configuration(_)
        ));
    }
}
