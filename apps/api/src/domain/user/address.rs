use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Maximum number of addresses a user may keep
pub const MAX_ADDRESSES: usize = 2;

/// A postal address embedded in the user document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(rename = "house_name")]
    pub house: String,
    #[serde(rename = "street_name")]
    pub street: String,
    #[serde(rename = "city_name")]
    pub city: String,
    #[serde(rename = "pin_code")]
    pub pincode: String,
}

/// The editable fields of an address, without its identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressFields {
    pub house: String,
    pub street: String,
    pub city: String,
    pub pincode: String,
}

impl Address {
    pub fn new(fields: AddressFields) -> Self {
        Self {
            id: ObjectId::new(),
            house: fields.house,
            street: fields.street,
            city: fields.city,
            pincode: fields.pincode,
        }
    }

    /// Overwrites the editable fields, keeping the address id
    pub fn apply(&mut self, fields: AddressFields) {
        self.house = fields.house;
        self.street = fields.street;
        self.city = fields.city;
        self.pincode = fields.pincode;
    }
}

/// Named slot in the user's address list
///
/// Addresses are stored positionally: index 0 holds the work address and
/// index 1 the home address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressSlot {
    Work,
    Home,
}

impl AddressSlot {
    pub fn index(self) -> usize {
        match self {
            AddressSlot::Work => 0,
            AddressSlot::Home => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AddressSlot::Work => "work",
            AddressSlot::Home => "home",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(house: &str) -> AddressFields {
        AddressFields {
            house: house.to_string(),
            street: "Nizami".to_string(),
            city: "Baku".to_string(),
            pincode: "AZ1000".to_string(),
        }
    }

    #[test]
    fn slots_keep_positional_layout() {
        assert_eq!(AddressSlot::Work.index(), 0);
        assert_eq!(AddressSlot::Home.index(), 1);
    }

    #[test]
    fn new_addresses_get_distinct_ids() {
        let a = Address::new(fields("12"));
        let b = Address::new(fields("12"));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn apply_keeps_id() {
        let mut address = Address::new(fields("12"));
        let id = address.id;
        address.apply(fields("7B"));
        assert_eq!(address.id, id);
        assert_eq!(address.house, "7B");
    }

    #[test]
    fn serializes_with_stored_field_names() {
        let doc = bson::to_document(&Address::new(fields("1"))).unwrap();
        for key in ["_id", "house_name", "street_name", "city_name", "pin_code"] {
            assert!(doc.contains_key(key), "missing {}", key);
        }
    }
}
