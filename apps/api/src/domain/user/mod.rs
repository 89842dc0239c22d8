// User domain module
// Contains the user document, its embedded address book and value objects

#![allow(clippy::module_inception)]

pub mod address;
pub mod user;
pub mod value_objects;

pub use address::{Address, AddressFields, AddressSlot, MAX_ADDRESSES};
pub use user::{NewUser, User};
pub use value_objects::{Email, Phone};
