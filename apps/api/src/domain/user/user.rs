use bson::oid::ObjectId;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::address::Address;
use super::value_objects::{Email, Phone};
use crate::domain::cart::{CartLine, Order};

/// User document as stored in the `Users` collection
///
/// The cart, address list and order history are embedded arrays. The cart
/// is rewritten freely; orders are only ever appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub first_name: String,
    pub last_name: String,
    /// bcrypt hash, never the plaintext
    pub password: String,
    pub email: String,
    pub phone: String,
    pub token: Option<String>,
    pub refresh_token: Option<String>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
    /// Hex form of `id`, the key used by the token store
    pub user_id: String,
    #[serde(rename = "usercart", default)]
    pub cart: Vec<CartLine>,
    #[serde(rename = "address", default)]
    pub addresses: Vec<Address>,
    #[serde(default)]
    pub orders: Vec<Order>,
}

/// Data needed to register a new account
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone: Phone,
    pub password_hash: String,
}

impl User {
    /// Builds a fresh user with empty cart, addresses and orders
    pub fn register(new_user: NewUser, id: ObjectId, token: String, refresh_token: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            password: new_user.password_hash,
            email: new_user.email.as_str().to_string(),
            phone: new_user.phone.as_str().to_string(),
            token: Some(token),
            refresh_token: Some(refresh_token),
            created_at: now,
            updated_at: now,
            user_id: id.to_hex(),
            cart: Vec::new(),
            addresses: Vec::new(),
            orders: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user() -> NewUser {
        NewUser {
            first_name: "Leyla".to_string(),
            last_name: "Aliyeva".to_string(),
            email: Email::new("leyla@example.com").unwrap(),
            phone: Phone::new("0501234567").unwrap(),
            password_hash: "$2b$04$hash".to_string(),
        }
    }

    #[test]
    fn register_starts_empty() {
        let id = ObjectId::new();
        let user = User::register(new_user(), id, "t".into(), "r".into());
        assert_eq!(user.user_id, id.to_hex());
        assert!(user.cart.is_empty());
        assert!(user.addresses.is_empty());
        assert!(user.orders.is_empty());
        assert_eq!(user.token.as_deref(), Some("t"));
    }

    #[test]
    fn document_uses_stored_field_names() {
        let user = User::register(new_user(), ObjectId::new(), "t".into(), "r".into());
        let doc = bson::to_document(&user).unwrap();
        assert!(doc.contains_key("usercart"));
        assert!(doc.contains_key("address"));
        assert!(doc.contains_key("orders"));
        assert!(doc.get_datetime("created_at").is_ok());
    }

    #[test]
    fn missing_arrays_decode_as_empty() {
        let user = User::register(new_user(), ObjectId::new(), "t".into(), "r".into());
        let mut doc = bson::to_document(&user).unwrap();
        doc.remove("usercart");
        doc.remove("orders");
        let decoded: User = bson::from_document(doc).unwrap();
        assert!(decoded.cart.is_empty());
        assert!(decoded.orders.is_empty());
    }
}
