use std::sync::Arc;

use crate::auth::jwt::{TokenError, TokenService};
use crate::config::AppConfig;
use crate::domain::accounts::AccountService;
use crate::domain::addresses::AddressBook;
use crate::domain::cart::CartEngine;
use crate::domain::catalog::Catalog;
use crate::domain::repositories::{ProductRepository, UserRepository};

/// Shared handler state: one instance of each domain service
#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountService,
    pub cart: CartEngine,
    pub addresses: AddressBook,
    pub catalog: Catalog,
}

impl AppState {
    /// Wires the domain services to the given repositories
    pub fn new(
        users: Arc<dyn UserRepository>,
        products: Arc<dyn ProductRepository>,
        config: &AppConfig,
    ) -> Result<Self, TokenError> {
        let tokens = TokenService::new(&config.secret_key)?;

        Ok(Self {
            accounts: AccountService::new(
                users.clone(),
                tokens,
                config.bcrypt_cost,
                config.timeouts,
            ),
            cart: CartEngine::new(users.clone(), products.clone(), config.timeouts),
            addresses: AddressBook::new(users, config.timeouts),
            catalog: Catalog::new(products, config.timeouts),
        })
    }
}
