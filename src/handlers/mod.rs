pub mod auth;
pub mod pool;

pub use pool::*;
