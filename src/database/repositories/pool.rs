use crate::database::models::{Pool, PoolPatch};
use crate::database::mongodb::{MongoDbClient, POOLS_COLLECTION};
use anyhow::{anyhow, Result};
use bson::{doc, oid::ObjectId};
use futures::TryStreamExt;
use log::{debug, info};
use mongodb::options::ReturnDocument;
use std::sync::Arc;

/// Pool repository for MongoDB operations
#[derive(Debug, Clone)]
pub struct PoolRepository {
    client: Arc<MongoDbClient>,
}

impl PoolRepository {
    /// Create a new PoolRepository instance
    pub fn new(client: Arc<MongoDbClient>) -> Self {
        Self { client }
    }

    /// Find a pool by its ObjectId
    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Pool>> {
        let collection = self.client.collection::<Pool>(POOLS_COLLECTION);
        let pool = collection.find_one(doc! { "_id": id }).await?;
        Ok(pool)
    }

    /// Find a page of pools, unfiltered
    pub async fn find_page(&self, skip: u64, limit: i64) -> Result<Vec<Pool>> {
        let collection = self.client.collection::<Pool>(POOLS_COLLECTION);
        let mut cursor = collection.find(doc! {}).skip(skip).limit(limit).await?;
        let mut pools = Vec::new();

        while let Some(pool) = cursor.try_next().await? {
            pools.push(pool);
        }

        debug!("Fetched {} pools (skip {}, limit {})", pools.len(), skip, limit);
        Ok(pools)
    }

    /// Find all pools owned by a user
    pub async fn find_by_owner(&self, owner: &ObjectId) -> Result<Vec<Pool>> {
        let collection = self.client.collection::<Pool>(POOLS_COLLECTION);
        let mut cursor = collection.find(doc! { "poolOwner": owner }).await?;
        let mut pools = Vec::new();

        while let Some(pool) = cursor.try_next().await? {
            pools.push(pool);
        }

        Ok(pools)
    }

    /// Insert a pool and return it with its assigned id
    pub async fn insert(&self, mut pool: Pool) -> Result<Pool> {
        let collection = self.client.collection::<Pool>(POOLS_COLLECTION);
        let result = collection.insert_one(&pool).await?;
        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| anyhow!("Inserted pool id is not an ObjectId"))?;

        info!("Inserted new pool: {} (owner: {})", id, pool.pool_owner);
        pool.id = Some(id);
        Ok(pool)
    }

    /// Apply a patch atomically and return the updated document
    pub async fn update(&self, id: &ObjectId, patch: &PoolPatch) -> Result<Option<Pool>> {
        let collection = self.client.collection::<Pool>(POOLS_COLLECTION);

        let pool = collection
            .find_one_and_update(doc! { "_id": id }, patch.to_set_document())
            .return_document(ReturnDocument::After)
            .await?;

        match &pool {
            Some(_) => debug!("Updated pool {}", id),
            None => debug!("Pool {} not found", id),
        }

        Ok(pool)
    }
}
