// JWT token creation and verification
// Access tokens live 24 hours (HS256), refresh tokens 7 days (HS384)

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ACCESS_TOKEN_TTL_HOURS: i64 = 24;
pub const REFRESH_TOKEN_TTL_HOURS: i64 = 168;

/// Identity claims carried by an access token
///
/// # Fields
/// * `uid` - Hex id of the user document
/// * `exp` - Expiry time (seconds since epoch)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub uid: String,
    pub exp: i64,
}

/// Claims carried by a refresh token
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RefreshClaims {
    pub uid: String,
    pub exp: i64,
}

/// An access token and its refresh token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub token: String,
    pub refresh_token: String,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token secret is not configured")]
    MissingSecret,

    #[error("failed to sign token: {0}")]
    Signing(String),

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("token is malformed: {0}")]
    Malformed(String),
}

/// Issues and validates signed session tokens
///
/// The signing secret is injected once at construction and shared by both
/// token kinds.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenService {
    /// Creates a token service for `secret`
    ///
    /// # Returns
    /// * `Err(TokenError::MissingSecret)` - If the secret is empty
    ///
    /// # Example
    /// ```
    /// use storefront_api::auth::jwt::TokenService;
    ///
    /// let service = TokenService::new("change-me").expect("secret set");
    /// let pair = service
    ///     .issue_tokens("a@b.com", "Ada", "Lovelace", "65f1c0ffee65f1c0ffee65f1")
    ///     .unwrap();
    /// let claims = service.validate_token(&pair.token).unwrap();
    /// assert_eq!(claims.first_name, "Ada");
    /// ```
    pub fn new(secret: &str) -> Result<Self, TokenError> {
        if secret.trim().is_empty() {
            return Err(TokenError::MissingSecret);
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        })
    }

    /// Signs a fresh access/refresh token pair for a user
    pub fn issue_tokens(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
        uid: &str,
    ) -> Result<TokenPair, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            email: email.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            uid: uid.to_string(),
            exp: (now + Duration::hours(ACCESS_TOKEN_TTL_HOURS)).timestamp(),
        };
        let refresh_claims = RefreshClaims {
            uid: uid.to_string(),
            exp: (now + Duration::hours(REFRESH_TOKEN_TTL_HOURS)).timestamp(),
        };

        Ok(TokenPair {
            token: self.sign(Algorithm::HS256, &claims)?,
            refresh_token: self.sign(Algorithm::HS384, &refresh_claims)?,
        })
    }

    /// Verifies an access token and returns its claims
    ///
    /// Expiry is checked against the decoded `exp` after the signature has
    /// been verified, so a correctly signed but stale token is still
    /// rejected.
    pub fn validate_token(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        let claims = decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature
                | ErrorKind::InvalidAlgorithm
                | ErrorKind::InvalidAlgorithmName => TokenError::InvalidSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed(e.to_string()),
            })?;

        if claims.exp < Utc::now().timestamp() {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    fn sign<T: Serialize>(&self, algorithm: Algorithm, claims: &T) -> Result<String, TokenError> {
        encode(&Header::new(algorithm), claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }
}
