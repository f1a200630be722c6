// MongoDB modules
pub mod models;
pub mod mongodb;
pub mod repositories;
pub mod service;
pub mod store;

// Re-export commonly used types
pub use self::mongodb::MongoDbClient;
pub use service::MongoDbService;
pub use store::PoolStore;
