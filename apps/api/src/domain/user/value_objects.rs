use serde::{Deserialize, Serialize};
use std::fmt;

/// Email value object for account lookups
///
/// # Invariants
/// - Must contain '@' character
/// - Must be at least 3 characters long
/// - Surrounding whitespace is trimmed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Creates a new Email value object
    ///
    /// # Example
    /// ```
    /// use storefront_api::domain::user::value_objects::Email;
    ///
    /// let email = Email::new(" shopper@example.com ").expect("valid email");
    /// assert_eq!(email.as_str(), "shopper@example.com");
    /// ```
    pub fn new(email: impl Into<String>) -> Result<Self, String> {
        let email = email.into().trim().to_string();
        if Self::is_valid(&email) {
            Ok(Email(email))
        } else {
            Err(format!("Invalid email: {}", email))
        }
    }

    fn is_valid(email: &str) -> bool {
        email.contains('@') && email.len() >= 3
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Phone number value object
///
/// Accepts digits with an optional leading '+', and the separators
/// ' ' and '-'. At least 6 digits are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phone(String);

impl Phone {
    pub fn new(phone: impl Into<String>) -> Result<Self, String> {
        let phone = phone.into().trim().to_string();
        if Self::is_valid(&phone) {
            Ok(Phone(phone))
        } else {
            Err(format!("Invalid phone: {}", phone))
        }
    }

    fn is_valid(phone: &str) -> bool {
        let body = phone.strip_prefix('+').unwrap_or(phone);
        let digits = body.chars().filter(char::is_ascii_digit).count();
        digits >= 6
            && body
                .chars()
                .all(|c| c.is_ascii_digit() || c == ' ' || c == '-')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
