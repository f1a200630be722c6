use crate::config::MongoDbConfig;
use anyhow::{anyhow, Result};
use log::{error, info};
use mongodb::{
    bson::doc,
    options::{ClientOptions, IndexOptions, ServerApi, ServerApiVersion},
    Client, Collection, Database as MongoDatabase, IndexModel,
};
use std::sync::Arc;
use std::time::Duration;

pub const POOLS_COLLECTION: &str = "pools";
pub const USERS_COLLECTION: &str = "users";

/// MongoDB client wrapper for managing database connections and operations
#[derive(Debug, Clone)]
pub struct MongoDbClient {
    _client: Client,
    database: MongoDatabase,
}

impl MongoDbClient {
    /// Initialize the MongoDB client with configuration
    pub async fn init(config: &MongoDbConfig) -> Result<Arc<Self>> {
        let connection_string = config.uri.clone();
        let database_name = config.database.clone();

        info!(
            "Connecting to MongoDB at {} with database {}",
            connection_string, database_name
        );

        let mut client_options = ClientOptions::parse(&connection_string)
            .await
            .map_err(|e| anyhow!("Failed to parse MongoDB connection string: {}", e))?;

        // Set server API version if using MongoDB Atlas
        let server_api = ServerApi::builder().version(ServerApiVersion::V1).build();
        client_options.server_api = Some(server_api);
        client_options.connect_timeout = Some(Duration::from_millis(config.connection_timeout_ms));
        client_options.server_selection_timeout =
            Some(Duration::from_millis(config.connection_timeout_ms));
        if let Some(max_pool_size) = config.max_pool_size {
            client_options.max_pool_size = Some(max_pool_size);
        }

        let client = Client::with_options(client_options)
            .map_err(|e| anyhow!("Failed to create MongoDB client: {}", e))?;

        let database = client.database(&database_name);

        // Test connection
        match database.run_command(doc! { "ping": 1 }).await {
            Ok(_) => info!(
                "Successfully connected to MongoDB database: {}",
                database_name
            ),
            Err(e) => {
                error!("Failed to connect to MongoDB: {}", e);
                return Err(anyhow!("Failed to connect to MongoDB: {}", e));
            }
        }

        let db_client = Arc::new(Self {
            _client: client,
            database,
        });

        db_client.create_indexes().await?;

        Ok(db_client)
    }

    /// Get a collection with the given name
    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.database.collection(name)
    }

    /// Create required indexes for all collections
    pub async fn create_indexes(&self) -> Result<()> {
        info!("Creating MongoDB indexes...");

        self.create_pool_indexes().await?;

        info!("MongoDB indexes created successfully");
        Ok(())
    }

    /// Create indexes for pools collection
    async fn create_pool_indexes(&self) -> Result<()> {
        let collection = self
            .database
            .collection::<mongodb::bson::Document>(POOLS_COLLECTION);

        let indexes = [
            // Owner listing
            (doc! { "poolOwner": 1 }, IndexOptions::default()),
            // Deployed pools are looked up by contract
            (
                doc! { "contractAddress": 1 },
                IndexOptions::builder().sparse(true).build(),
            ),
        ];

        for (keys, options) in indexes {
            let index = IndexModel::builder().keys(keys).options(options).build();
            collection
                .create_index(index)
                .await
                .map_err(|e| anyhow!("Failed to create pool index: {}", e))?;
        }

        Ok(())
    }
}
