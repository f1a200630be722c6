use crate::database::models::User;
use crate::database::mongodb::{MongoDbClient, USERS_COLLECTION};
use anyhow::Result;
use bson::{doc, oid::ObjectId};
use std::sync::Arc;

/// Read-only access to the users collection
#[derive(Debug, Clone)]
pub struct UserRepository {
    client: Arc<MongoDbClient>,
}

impl UserRepository {
    pub fn new(client: Arc<MongoDbClient>) -> Self {
        Self { client }
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>> {
        let collection = self.client.collection::<User>(USERS_COLLECTION);
        let user = collection.find_one(doc! { "_id": id }).await?;
        Ok(user)
    }
}
