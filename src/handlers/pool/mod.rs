pub mod dto;
pub mod pool;
pub mod service;

pub use dto::*;
pub use pool::*;
