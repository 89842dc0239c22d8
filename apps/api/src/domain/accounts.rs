use std::sync::Arc;

use bson::oid::ObjectId;
use chrono::Utc;
use tracing::{info, warn};

use crate::auth::jwt::{Claims, TokenPair, TokenService};
use crate::auth::password::{hash_password, verify_password};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::repositories::UserRepository;
use crate::domain::timeouts::{bounded, OperationTimeouts};
use crate::domain::user::{Email, NewUser, Phone, User};

/// Registration data as received from a client
#[derive(Debug, Clone)]
pub struct SignupInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
}

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct Session {
    pub tokens: TokenPair,
    pub user: User,
}

/// Signup, login and token bookkeeping
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    tokens: TokenService,
    hash_cost: u32,
    timeouts: OperationTimeouts,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        tokens: TokenService,
        hash_cost: u32,
        timeouts: OperationTimeouts,
    ) -> Self {
        Self {
            users,
            tokens,
            hash_cost,
            timeouts,
        }
    }

    /// Registers a new user with an empty cart, address list and order history
    ///
    /// Email and phone must both be unused.
    pub async fn sign_up(&self, input: SignupInput) -> DomainResult<User> {
        let email = Email::new(input.email).map_err(DomainError::InvalidArgument)?;
        let phone = Phone::new(input.phone).map_err(DomainError::InvalidArgument)?;

        bounded(self.timeouts.long, "sign_up", async {
            if self.users.count_by_email(&email).await? > 0 {
                return Err(DomainError::AlreadyExists("user already exists".to_string()));
            }
            if self.users.count_by_phone(&phone).await? > 0 {
                return Err(DomainError::AlreadyExists(
                    "this phone is already in use".to_string(),
                ));
            }

            let password_hash = self.hash(input.password).await?;
            let id = ObjectId::new();
            let pair = self.tokens.issue_tokens(
                email.as_str(),
                &input.first_name,
                &input.last_name,
                &id.to_hex(),
            )?;

            let user = User::register(
                NewUser {
                    first_name: input.first_name,
                    last_name: input.last_name,
                    email,
                    phone,
                    password_hash,
                },
                id,
                pair.token,
                pair.refresh_token,
            );
            self.users.insert(&user).await?;

            info!(user = %user.user_id, "registered new user");
            Ok(user)
        })
        .await
    }

    /// Checks credentials and issues a fresh token pair
    ///
    /// An unknown email and a wrong password fail identically.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<Session> {
        let email = Email::new(email).map_err(|_| DomainError::InvalidCredentials)?;
        let password = password.to_string();

        bounded(self.timeouts.long, "login", async {
            let mut user = self
                .users
                .find_by_email(&email)
                .await?
                .ok_or(DomainError::InvalidCredentials)?;

            if !self.verify(password, user.password.clone()).await? {
                return Err(DomainError::InvalidCredentials);
            }

            let pair = self.tokens.issue_tokens(
                &user.email,
                &user.first_name,
                &user.last_name,
                &user.user_id,
            )?;
            self.persist_tokens(&user.user_id, &pair).await?;

            user.token = Some(pair.token.clone());
            user.refresh_token = Some(pair.refresh_token.clone());
            info!(user = %user.user_id, "user logged in");
            Ok(Session { tokens: pair, user })
        })
        .await
    }

    /// Upserts the latest token pair and update time for `user_id`
    pub async fn persist_tokens(&self, user_id: &str, pair: &TokenPair) -> DomainResult<()> {
        self.users
            .update_tokens(user_id, &pair.token, &pair.refresh_token, Utc::now())
            .await?;
        Ok(())
    }

    /// Validates an access token
    pub fn authenticate(&self, token: &str) -> DomainResult<Claims> {
        Ok(self.tokens.validate_token(token)?)
    }

    async fn hash(&self, password: String) -> DomainResult<String> {
        let cost = self.hash_cost;
        tokio::task::spawn_blocking(move || hash_password(&password, cost))
            .await
            .map_err(|e| DomainError::Configuration(format!("hashing task failed: {}", e)))?
            .map_err(|e| DomainError::Configuration(format!("failed to hash password: {}", e)))
    }

    async fn verify(&self, password: String, stored_hash: String) -> DomainResult<bool> {
        let outcome = tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
            .await
            .map_err(|e| DomainError::Configuration(format!("verification task failed: {}", e)))?;

        match outcome {
            Ok(valid) => Ok(valid),
            Err(e) => {
                warn!(error = %e, "stored password hash could not be parsed");
                Ok(false)
            }
        }
    }
}
