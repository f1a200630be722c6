use anyhow::Result;
use async_trait::async_trait;
use bson::oid::ObjectId;

use super::models::{Pool, PoolPatch, User};

/// Data-access interface the pool handlers depend on
#[async_trait]
pub trait PoolStore: Send + Sync {
    async fn find_pool_by_id(&self, id: &ObjectId) -> Result<Option<Pool>>;

    /// Unfiltered page of pools
    async fn find_pools(&self, skip: u64, limit: i64) -> Result<Vec<Pool>>;

    async fn find_pools_by_owner(&self, owner: &ObjectId) -> Result<Vec<Pool>>;

    async fn find_user_by_id(&self, id: &ObjectId) -> Result<Option<User>>;

    /// Persist a new pool, returning it with its id set
    async fn insert_pool(&self, pool: Pool) -> Result<Pool>;

    /// Returns `None` when no pool has that id
    async fn update_pool(&self, id: &ObjectId, patch: &PoolPatch) -> Result<Option<Pool>>;
}
