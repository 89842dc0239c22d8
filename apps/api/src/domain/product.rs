use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Catalog product as stored in the `Products` collection
///
/// Prices are integers in minor currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(rename = "product_name")]
    pub name: String,
    pub price: u32,
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub image: String,
}

/// Fields supplied when an admin adds a product
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: u32,
    pub rating: u8,
    pub image: String,
}

impl Product {
    pub fn create(new_product: NewProduct) -> Self {
        Self {
            id: ObjectId::new(),
            name: new_product.name,
            price: new_product.price,
            rating: new_product.rating,
            image: new_product.image,
        }
    }
}
