// Authentication primitives: token signing and password hashing

pub mod jwt;
pub mod password;

pub use jwt::{Claims, TokenError, TokenPair, TokenService};
