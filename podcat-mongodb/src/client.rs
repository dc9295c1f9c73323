//! Store client wrapper with built-in connection pooling.

use std::sync::Arc;

use bson::Document;
use mongodb::{Client, Database};
use podcat_model::{Model, ModelInfo, ModelRegistry};
use tracing::info;

use crate::collection::Collection;
use crate::config::StoreConfig;
use crate::error::{MongoError, MongoResult};

/// A MongoDB client bound to one database.
///
/// The driver pools connections internally; clones share the pool.
#[derive(Clone, Debug)]
pub struct MongoClient {
    client: Client,
    database: Database,
    config: Arc<StoreConfig>,
}

impl MongoClient {
    /// Create a new client from configuration.
    ///
    /// The driver connects lazily, so this succeeds without a reachable server.
    pub async fn new(config: StoreConfig) -> MongoResult<Self> {
        let options = config.to_client_options().await?;

        let client = Client::with_options(options)
            .map_err(|e| MongoError::config(format!("failed to create client: {}", e)))?;

        let database = client.database(&config.database);

        info!(
            uri = %config.uri,
            database = %config.database,
            "MongoDB client created"
        );

        Ok(Self {
            client,
            database,
            config: Arc::new(config),
        })
    }

    /// Bind a collection to the registered descriptor of `T`.
    ///
    /// Fails with a contract violation if `T` was never registered.
    pub fn collection<T: Model>(
        &self,
        name: &str,
        registry: &ModelRegistry,
    ) -> MongoResult<Collection<T>> {
        let info = registry.get::<T>()?;
        Ok(self.collection_with_info(name, info))
    }

    /// Bind a collection to an explicit descriptor.
    pub fn collection_with_info<T: Model>(&self, name: &str, info: Arc<ModelInfo>) -> Collection<T> {
        Collection::new(self.database.collection::<Document>(name), info)
    }

    /// Get the underlying database.
    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Get the underlying MongoDB client.
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Get the configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}
