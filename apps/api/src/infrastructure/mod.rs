// Infrastructure layer module
// Contains the MongoDB connection and repository adapters
// Follows Hexagonal Architecture

pub mod database;
pub mod repositories;
