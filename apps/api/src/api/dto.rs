//! JSON views of domain documents
//!
//! Document ids are rendered as 24-character hex strings and password
//! hashes never leave the server.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::cart::{CartLine, CartSummary, Order, PaymentMethod};
use crate::domain::product::Product;
use crate::domain::user::{Address, User};

/// Acknowledgement body for writes that return no document
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProductResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub product_name: String,
    pub price: u32,
    pub rating: u8,
    pub image: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.to_hex(),
            product_name: product.name,
            price: product.price,
            rating: product.rating,
            image: product.image,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CartLineResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub product_name: String,
    pub price: u32,
    pub rating: u8,
    pub image: String,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        Self {
            id: line.product_id.to_hex(),
            product_name: line.name,
            price: line.price,
            rating: line.rating,
            image: line.image,
        }
    }
}

/// Cart listing with its aggregate total
#[derive(Debug, Serialize, Deserialize)]
pub struct CartResponse {
    pub cart_items: Vec<CartLineResponse>,
    pub total_price: u64,
    pub total_items: usize,
}

impl From<CartSummary> for CartResponse {
    fn from(summary: CartSummary) -> Self {
        Self {
            cart_items: summary.lines.into_iter().map(Into::into).collect(),
            total_price: summary.total,
            total_items: summary.count,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PaymentResponse {
    #[serde(rename = "Digital")]
    pub digital: bool,
    #[serde(rename = "COD")]
    pub cod: bool,
}

impl From<PaymentMethod> for PaymentResponse {
    fn from(payment: PaymentMethod) -> Self {
        Self {
            digital: payment.digital,
            cod: payment.cod,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub ordered_at: DateTime<Utc>,
    pub total_price: u64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub discount: Option<u32>,
    pub payment_method: PaymentResponse,
    pub order_list: Vec<CartLineResponse>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.order_id.to_hex(),
            ordered_at: order.ordered_at,
            total_price: order.price,
            discount: order.discount,
            payment_method: order.payment_method.into(),
            order_list: order.order_list.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddressResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub house_name: String,
    pub street_name: String,
    pub city_name: String,
    pub pin_code: String,
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        Self {
            id: address.id.to_hex(),
            house_name: address.house,
            street_name: address.street,
            city_name: address.city,
            pin_code: address.pincode,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: String,
    pub usercart: Vec<CartLineResponse>,
    pub address: Vec<AddressResponse>,
    pub orders: Vec<OrderResponse>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_hex(),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            phone: user.phone,
            created_at: user.created_at,
            updated_at: user.updated_at,
            user_id: user.user_id,
            usercart: user.cart.into_iter().map(Into::into).collect(),
            address: user.addresses.into_iter().map(Into::into).collect(),
            orders: user.orders.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::oid::ObjectId;

    #[test]
    fn ids_render_as_hex() {
        let product = Product {
            id: ObjectId::new(),
            name: "Alienware x15".into(),
            price: 2500,
            rating: 5,
            image: "alienware.jpg".into(),
        };
        let hex = product.id.to_hex();

        let json = serde_json::to_value(ProductResponse::from(product)).unwrap();
        assert_eq!(json["_id"], hex);
        assert_eq!(json["product_name"], "Alienware x15");
    }

    #[test]
    fn orders_use_payment_flags() {
        let json = serde_json::to_value(OrderResponse::from(Order::header(1250))).unwrap();
        assert_eq!(json["total_price"], 1250);
        assert_eq!(json["payment_method"]["COD"], true);
        assert_eq!(json["payment_method"]["Digital"], false);
        assert!(json.get("discount").is_none());
    }
}
