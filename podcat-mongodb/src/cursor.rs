//! Result handles for finds and aggregation pipelines.
//!
//! Both are lazy: nothing is sent to the server until a record is requested.

use std::marker::PhantomData;

use bson::Document;
use futures::TryStreamExt;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::document::from_document;
use crate::error::{MongoError, MongoResult};
use crate::query::FindSpec;

/// A pending find over a collection of `T` records.
#[derive(Debug, Clone)]
pub struct Cursor<T> {
    collection: mongodb::Collection<Document>,
    spec: FindSpec,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Cursor<T> {
    pub(crate) fn new(collection: mongodb::Collection<Document>, spec: FindSpec) -> Self {
        Self {
            collection,
            spec,
            _marker: PhantomData,
        }
    }

    /// The translated filter and options.
    pub fn spec(&self) -> &FindSpec {
        &self.spec
    }
}

impl<T: DeserializeOwned> Cursor<T> {
    /// Fetch and decode the first matching record.
    ///
    /// Returns [`MongoError::NotFound`] when nothing matches.
    pub async fn one(self) -> MongoResult<T> {
        let name = self.collection.name().to_string();
        self.first()
            .await?
            .ok_or_else(|| MongoError::not_found(name))
    }

    /// Fetch and decode the first matching record, if any.
    pub async fn first(self) -> MongoResult<Option<T>> {
        let FindSpec { filter, mut options } = self.spec;
        options.limit = Some(1);

        debug!(collection = %self.collection.name(), filter = ?filter, "Executing find one");
        let mut cursor = self.collection.find(filter, options).await?;
        match cursor.try_next().await? {
            Some(doc) => Ok(Some(from_document(doc)?)),
            None => Ok(None),
        }
    }

    /// Fetch and decode every matching record.
    pub async fn all(self) -> MongoResult<Vec<T>> {
        let FindSpec { filter, options } = self.spec;

        debug!(collection = %self.collection.name(), filter = ?filter, "Executing find");
        let docs: Vec<Document> = self
            .collection
            .find(filter, options)
            .await?
            .try_collect()
            .await?;

        docs.into_iter().map(from_document).collect()
    }
}

/// A pending aggregation pipeline.
#[derive(Debug, Clone)]
pub struct Pipe {
    collection: mongodb::Collection<Document>,
    stages: Vec<Document>,
}

impl Pipe {
    pub(crate) fn new(collection: mongodb::Collection<Document>, stages: Vec<Document>) -> Self {
        Self { collection, stages }
    }

    /// The pipeline stages, as given.
    pub fn stages(&self) -> &[Document] {
        &self.stages
    }

    /// Run the pipeline and decode every output document.
    pub async fn all<R: DeserializeOwned>(self) -> MongoResult<Vec<R>> {
        debug!(
            collection = %self.collection.name(),
            stages = self.stages.len(),
            "Executing aggregation"
        );
        let docs: Vec<Document> = self
            .collection
            .aggregate(self.stages, None)
            .await?
            .try_collect()
            .await?;

        docs.into_iter().map(from_document).collect()
    }

    /// Run the pipeline and decode the first output document.
    pub async fn one<R: DeserializeOwned>(self) -> MongoResult<R> {
        let name = self.collection.name().to_string();
        let mut cursor = self.collection.aggregate(self.stages, None).await?;
        match cursor.try_next().await? {
            Some(doc) => from_document(doc),
            None => Err(MongoError::not_found(format!("aggregation on {}", name))),
        }
    }
}
