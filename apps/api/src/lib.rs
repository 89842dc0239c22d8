//! Storefront API Library
//!
//! This library provides the core functionality for the storefront API,
//! including the cart and order engine, accounts, repositories, and the
//! HTTP layer.

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
