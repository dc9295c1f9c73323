//! The catalog's record collections.
//!
//! Each record collection is a thin wrapper over a model-bound
//! [`Collection`](podcat_mongodb::Collection) that adds record-specific helpers.

mod feed;
mod log;
mod merge;

pub use feed::{FEED_UPDATE_IGNORED, Feed, FeedCollection, Item};
pub use log::{Log, LogCollection};
pub use merge::merge_feeds;

use std::sync::Arc;

use podcat_model::ModelRegistry;
use podcat_mongodb::{MongoClient, MongoResult, StoreConfig};
use tracing::info;

/// Collection holding [`Feed`] records.
pub const FEEDS: &str = "feeds";

/// Collection holding [`Log`] records.
pub const LOGS: &str = "logs";

/// Every record collection of the catalog, bound to one client.
#[derive(Debug, Clone)]
pub struct Catalog {
    client: MongoClient,
    registry: Arc<ModelRegistry>,
    feeds: FeedCollection,
    logs: LogCollection,
}

impl Catalog {
    /// Build the descriptors of every catalog record type.
    pub fn registry() -> ModelRegistry {
        ModelRegistry::new().with::<Feed>().with::<Log>()
    }

    /// Connect to the store and bind the catalog's collections.
    pub async fn connect(config: StoreConfig) -> MongoResult<Self> {
        let client = MongoClient::new(config).await?;
        Self::with_client(client, Self::registry())
    }

    /// Bind the catalog's collections on an existing client.
    ///
    /// Fails with a contract violation if `registry` lacks a catalog model.
    pub fn with_client(client: MongoClient, registry: ModelRegistry) -> MongoResult<Self> {
        let feeds = FeedCollection::new(client.collection::<Feed>(FEEDS, &registry)?);
        let logs = LogCollection::new(client.collection::<Log>(LOGS, &registry)?);

        Ok(Self {
            client,
            registry: Arc::new(registry),
            feeds,
            logs,
        })
    }

    /// Create the indexes declared by every catalog model.
    pub async fn ensure_indexes(&self) -> MongoResult<()> {
        let feeds = self.feeds.ensure_indexes().await?;
        let logs = self.logs.ensure_indexes().await?;
        info!(feeds = feeds.len(), logs = logs.len(), "Catalog indexes ensured");
        Ok(())
    }

    /// Feed records.
    pub fn feeds(&self) -> &FeedCollection {
        &self.feeds
    }

    /// Request log records.
    pub fn logs(&self) -> &LogCollection {
        &self.logs
    }

    /// The model registry the collections were bound from.
    pub fn models(&self) -> &ModelRegistry {
        &self.registry
    }

    /// The underlying client.
    pub fn client(&self) -> &MongoClient {
        &self.client
    }
}
