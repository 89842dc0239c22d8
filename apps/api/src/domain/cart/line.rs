use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::domain::product::Product;

/// One product snapshot embedded in a user's cart or in an order
///
/// The line keeps the product's id as its own `_id`, so removing a product
/// from the cart pulls every line sharing that id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(rename = "_id")]
    pub product_id: ObjectId,
    #[serde(rename = "product_name")]
    pub name: String,
    pub price: u32,
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub image: String,
}

impl From<&Product> for CartLine {
    fn from(product: &Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            rating: product.rating,
            image: product.image.clone(),
        }
    }
}

impl From<Product> for CartLine {
    fn from(product: Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name,
            price: product.price,
            rating: product.rating,
            image: product.image,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_copies_product_fields() {
        let product = Product {
            id: ObjectId::new(),
            name: "iPhone 13".to_string(),
            price: 900,
            rating: 8,
            image: "iphone.png".to_string(),
        };
        let line = CartLine::from(&product);
        assert_eq!(line.product_id, product.id);
        assert_eq!(line.price, 900);
        assert_eq!(line.name, product.name);
    }

    #[test]
    fn product_document_decodes_as_line() {
        let id = ObjectId::new();
        let doc = bson::doc! { "_id": id, "product_name": "mouse", "price": 25_i64, "rating": 4_i32, "image": "" };
        let line: CartLine = bson::from_document(doc).unwrap();
        assert_eq!(line.product_id, id);
        assert_eq!(line.price, 25);
    }
}
