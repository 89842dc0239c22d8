// Domain layer module exports
// Following Hexagonal Architecture: services depend on repository ports only

pub mod accounts;
pub mod addresses;
pub mod cart;
pub mod catalog;
pub mod errors;
pub mod ids;
pub mod product;
pub mod repositories;
pub mod timeouts;
pub mod user;

pub use errors::{DomainError, DomainResult, StoreError, StoreResult};
