//! # podcat-mongodb
//!
//! MongoDB document store layer for the podcast catalog.
//!
//! This crate provides:
//! - [`Collection`]: a driver collection bound to a model descriptor
//! - [`Query`]: filter, sort, projection and limit, translated to driver options
//! - [`Cursor`] and [`Pipe`]: lazy handles over finds and aggregations
//! - Index provisioning from the descriptor's index definitions
//! - API rendering of stored documents using external field names
//!
//! ## Example
//!
//! ```rust,ignore
//! use podcat_mongodb::{MongoClient, Query, StoreConfig};
//!
//! let registry = ModelRegistry::new().with::<Feed>();
//! let client = MongoClient::new(StoreConfig::from_uri(uri, "catalog")).await?;
//! let feeds = client.collection::<Feed>("feeds", &registry)?;
//!
//! feeds.ensure_indexes().await?;
//!
//! let latest: Vec<Feed> = feeds
//!     .find(Some(&Query::new().sort_by("modification_time", true).limit(10)))
//!     .all()
//!     .await?;
//! ```
//!
//! Store errors are returned as [`MongoError`] without retry or translation.

pub mod client;
pub mod collection;
pub mod config;
pub mod cursor;
pub mod document;
pub mod error;
pub mod filter;
pub mod query;

pub use bson::oid::ObjectId;
pub use bson::{Bson, Document, doc};
pub use client::MongoClient;
pub use collection::Collection;
pub use config::{StoreConfig, StoreConfigBuilder};
pub use cursor::{Cursor, Pipe};
pub use error::{MongoError, MongoResult};
pub use filter::FilterBuilder;
pub use query::{FindSpec, Query};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::client::MongoClient;
    pub use crate::collection::Collection;
    pub use crate::config::{StoreConfig, StoreConfigBuilder};
    pub use crate::cursor::{Cursor, Pipe};
    pub use crate::document::{api_document, to_api_json};
    pub use crate::error::{MongoError, MongoResult};
    pub use crate::filter::FilterBuilder;
    pub use crate::query::Query;
    pub use bson::oid::ObjectId;
    pub use bson::{Bson, Document, doc};
}
