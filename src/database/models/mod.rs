pub mod pool;
pub mod user;

pub use pool::{Pool, PoolFields, PoolPatch, Quantity};
pub use user::User;
