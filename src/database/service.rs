use anyhow::Result;
use async_trait::async_trait;
use bson::oid::ObjectId;
use std::sync::Arc;

use super::models::{Pool, PoolPatch, User};
use super::mongodb::MongoDbClient;
use super::repositories::{PoolRepository, UserRepository};
use super::store::PoolStore;
use crate::config::MongoDbConfig;

/// MongoDB service for managing database operations
///
/// A thin facade over the repository layer. Handlers reach it through the
/// [`PoolStore`] trait so they can be exercised without a live database.
#[derive(Debug, Clone)]
pub struct MongoDbService {
    _client: Arc<MongoDbClient>,
    pool_repo: PoolRepository,
    user_repo: UserRepository,
}

impl MongoDbService {
    /// Create a new MongoDB service
    pub async fn new(config: &MongoDbConfig) -> Result<Self> {
        config.validate()?;
        let client = MongoDbClient::init(config).await?;

        let pool_repo = PoolRepository::new(client.clone());
        let user_repo = UserRepository::new(client.clone());

        Ok(Self {
            _client: client,
            pool_repo,
            user_repo,
        })
    }
}

#[async_trait]
impl PoolStore for MongoDbService {
    async fn find_pool_by_id(&self, id: &ObjectId) -> Result<Option<Pool>> {
        self.pool_repo.find_by_id(id).await
    }

    async fn find_pools(&self, skip: u64, limit: i64) -> Result<Vec<Pool>> {
        self.pool_repo.find_page(skip, limit).await
    }

    async fn find_pools_by_owner(&self, owner: &ObjectId) -> Result<Vec<Pool>> {
        self.pool_repo.find_by_owner(owner).await
    }

    async fn find_user_by_id(&self, id: &ObjectId) -> Result<Option<User>> {
        self.user_repo.find_by_id(id).await
    }

    async fn insert_pool(&self, pool: Pool) -> Result<Pool> {
        self.pool_repo.insert(pool).await
    }

    async fn update_pool(&self, id: &ObjectId, patch: &PoolPatch) -> Result<Option<Pool>> {
        self.pool_repo.update(id, patch).await
    }
}
