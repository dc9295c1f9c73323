//! # Podcat
//!
//! Document mapping and storage for a podcast catalog backend.
//!
//! Podcat provides:
//! - Annotation-driven model metadata (`#[derive(Model)]`)
//! - Change detection between two versions of a record
//! - MongoDB collections, queries, cursors and index provisioning
//! - The catalog's record types: feeds with their items, and request logs
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use podcat::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), MongoError> {
//!     podcat::logging::init();
//!
//!     let catalog = Catalog::connect(StoreConfig::from_env()?).await?;
//!     catalog.ensure_indexes().await?;
//!
//!     let feed = catalog.feeds().feed_by_url("https://example.com/rss").await?;
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod catalog;
pub mod logging;

/// Model metadata, change-copy and the model registry.
pub mod model {
    pub use podcat_model::*;
}

/// MongoDB collections, queries and cursors.
pub mod store {
    pub use podcat_mongodb::*;
}

// Re-export proc macros
pub use podcat_codegen::Model;

pub use catalog::{Catalog, Feed, FeedCollection, Item, Log, LogCollection, merge_feeds};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::Model;
    pub use crate::catalog::{Catalog, Feed, FeedCollection, Item, Log, LogCollection, merge_feeds};
    pub use podcat_model::prelude::*;
    pub use podcat_mongodb::prelude::*;
}
