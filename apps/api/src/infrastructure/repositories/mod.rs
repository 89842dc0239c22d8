// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod in_memory;
pub mod mongo_product_repository;
pub mod mongo_user_repository;

pub use in_memory::InMemoryStore;
pub use mongo_product_repository::MongoProductRepository;
pub use mongo_user_repository::MongoUserRepository;
