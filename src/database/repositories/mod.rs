pub mod pool;
pub mod user;

pub use pool::PoolRepository;
pub use user::UserRepository;
