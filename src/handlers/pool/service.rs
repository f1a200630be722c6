use bson::oid::ObjectId;
use log::debug;

use crate::{
    database::{
        models::{Pool, PoolPatch},
        PoolStore,
    },
    errors::ApiError,
    handlers::pool::dto::{CreatePoolRequest, Pagination, PoolResponse},
};

/// Service layer for pool-related business logic
pub struct PoolService;

impl PoolService {
    /// Parse a path segment as an ObjectId
    pub fn parse_id(raw: &str, what: &str) -> Result<ObjectId, ApiError> {
        ObjectId::parse_str(raw)
            .map_err(|e| ApiError::BadRequest(format!("Invalid {} format: {}", what, e)))
    }

    /// Get a pool by id, `None` when it does not exist
    pub async fn get_pool(
        store: &dyn PoolStore,
        id: &ObjectId,
    ) -> anyhow::Result<Option<PoolResponse>> {
        debug!("Fetching pool with id: {}", id);

        let pool = store.find_pool_by_id(id).await?;
        Ok(pool.map(PoolResponse::from))
    }

    /// Get one page of pools
    ///
    /// # Arguments
    /// * `store` - Pool store
    /// * `pagination` - Resolved page and limit
    ///
    /// # Returns
    /// * `Ok(Vec<PoolResponse>)` - The page, possibly empty
    /// * `Err(anyhow::Error)` - Error if database operation fails
    pub async fn get_pools_page(
        store: &dyn PoolStore,
        pagination: Pagination,
    ) -> anyhow::Result<Vec<PoolResponse>> {
        let skip = pagination.skip();
        debug!(
            "Fetching pools page {} (skip {}, limit {})",
            pagination.page, skip, pagination.limit
        );

        let pools = store.find_pools(skip, pagination.limit).await?;
        Ok(pools.into_iter().map(PoolResponse::from).collect())
    }

    /// Get all pools of an owner
    pub async fn get_pools_by_owner(
        store: &dyn PoolStore,
        owner: &ObjectId,
    ) -> anyhow::Result<Vec<PoolResponse>> {
        debug!("Fetching pools with owner: {}", owner);

        let pools = store.find_pools_by_owner(owner).await?;
        Ok(pools.into_iter().map(PoolResponse::from).collect())
    }

    /// Create a pending pool owned by `user_id`
    ///
    /// # Arguments
    /// * `store` - Pool store
    /// * `user_id` - Authenticated caller's id
    /// * `request` - Descriptive fields, stored as given
    ///
    /// # Returns
    /// * `Ok(PoolResponse)` - Created pool
    /// * `Err(ApiError::Unauthorized)` - The caller has no user record
    /// * `Err(ApiError::DatabaseError)` - Error if a database operation fails
    pub async fn create_pool(
        store: &dyn PoolStore,
        user_id: &str,
        request: CreatePoolRequest,
    ) -> Result<PoolResponse, ApiError> {
        let user_oid = ObjectId::parse_str(user_id)
            .map_err(|_| ApiError::Unauthorized("Invalid user id in token".to_string()))?;

        let user = store
            .find_user_by_id(&user_oid)
            .await?
            .ok_or_else(|| ApiError::Unauthorized(format!("User {} not found", user_id)))?;

        debug!("Creating new pool for owner: {}", user.id);

        let pool = Pool::new(user.id, request.into());
        let created = store.insert_pool(pool).await?;

        Ok(PoolResponse::from(created))
    }

    /// Merge a patch into a pool. No ownership check is performed.
    pub async fn update_pool(
        store: &dyn PoolStore,
        id: &ObjectId,
        patch: PoolPatch,
    ) -> anyhow::Result<Option<PoolResponse>> {
        debug!("Updating pool with id: {}", id);

        let pool = store.update_pool(id, &patch).await?;
        Ok(pool.map(PoolResponse::from))
    }
}
