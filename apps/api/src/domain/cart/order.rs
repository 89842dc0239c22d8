use bson::oid::ObjectId;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::line::CartLine;

/// Payment flags stored with an order
///
/// Only cash on delivery is modelled; `digital` is always false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub digital: bool,
    pub cod: bool,
}

impl PaymentMethod {
    pub fn cash_on_delivery() -> Self {
        Self {
            digital: false,
            cod: true,
        }
    }
}

/// An order appended to the user's order history
///
/// The header (id, timestamp, price, payment) is written first and the
/// line items are pushed into `order_list` by a second update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id")]
    pub order_id: ObjectId,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub ordered_at: DateTime<Utc>,
    #[serde(rename = "total_price")]
    pub price: u64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub discount: Option<u32>,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub order_list: Vec<CartLine>,
}

impl Order {
    /// Builds an order header with a fresh id and no line items
    pub fn header(price: u64) -> Self {
        Self {
            order_id: ObjectId::new(),
            ordered_at: Utc::now(),
            price,
            discount: None,
            payment_method: PaymentMethod::cash_on_delivery(),
            order_list: Vec::new(),
        }
    }
}
