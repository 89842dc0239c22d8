// Password hashing utilities
// Uses bcrypt; production cost is 14

use bcrypt::{hash, verify};

/// bcrypt work factor used unless configured otherwise
pub const DEFAULT_HASH_COST: u32 = 14;

/// Hashes a password using bcrypt at the given cost
///
/// # Example
/// ```
/// use storefront_api::auth::password::{hash_password, verify_password};
///
/// let hash = hash_password("my_password", 4).expect("valid hash");
/// assert!(verify_password("my_password", &hash).unwrap());
/// ```
pub fn hash_password(password: &str, cost: u32) -> Result<String, String> {
    hash(password, cost).map_err(|e| e.to_string())
}

/// Verifies a password against a bcrypt hash
///
/// # Returns
/// * `Ok(bool)` - True if password matches, false otherwise
/// * `Err(String)` - If the stored hash cannot be parsed
pub fn verify_password(password: &str, hash: &str) -> Result<bool, String> {
    verify(password, hash).map_err(|e| e.to_string())
}
