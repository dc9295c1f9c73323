//! Model-bound collections.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use bson::{Bson, Document, doc, oid::ObjectId};
use mongodb::IndexModel;
use mongodb::options::IndexOptions;
use podcat_model::{Index, Model, ModelInfo};
use serde::Serialize;
use tracing::{debug, info};

use crate::cursor::{Cursor, Pipe};
use crate::document::to_document;
use crate::error::MongoResult;
use crate::query::{FindSpec, Query};

/// A store collection bound to the descriptor of its record type.
///
/// Holds no state beyond the binding, so clones are cheap and can be shared
/// across tasks.
pub struct Collection<T> {
    inner: mongodb::Collection<Document>,
    info: Arc<ModelInfo>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            info: Arc::clone(&self.info),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("name", &self.inner.name())
            .field("model", &self.info.name())
            .finish()
    }
}

impl<T: Model> Collection<T> {
    /// Bind a driver collection to a model descriptor.
    pub fn new(inner: mongodb::Collection<Document>, info: Arc<ModelInfo>) -> Self {
        Self {
            inner,
            info,
            _marker: PhantomData,
        }
    }

    /// Collection name.
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// The bound model descriptor.
    pub fn info(&self) -> &ModelInfo {
        &self.info
    }

    /// The underlying driver collection.
    pub fn inner(&self) -> &mongodb::Collection<Document> {
        &self.inner
    }

    /// Find records matching `query`. `None` matches everything, unsorted and
    /// unlimited.
    pub fn find(&self, query: Option<&Query>) -> Cursor<T> {
        Cursor::new(self.inner.clone(), FindSpec::from_query(query))
    }

    /// Find the record with the given identifier.
    pub fn find_by_id(&self, id: ObjectId) -> Cursor<T> {
        Cursor::new(self.inner.clone(), FindSpec::by_id(id))
    }

    /// Create an index from its definition.
    ///
    /// Creating an existing identical index is a no-op on the server; a
    /// conflicting definition comes back as the driver's error.
    pub async fn ensure_index(&self, index: &Index) -> MongoResult<String> {
        debug!(collection = %self.name(), index = %index.name, key = ?index.key, "Ensuring index");
        let result = self.inner.create_index(index_model(index), None).await?;
        Ok(result.index_name)
    }

    /// Create every index declared by the bound model.
    pub async fn ensure_indexes(&self) -> MongoResult<Vec<String>> {
        let mut names = Vec::new();
        for index in self.info.indexes() {
            names.push(self.ensure_index(index).await?);
        }
        info!(collection = %self.name(), indexes = names.len(), "Indexes ensured");
        Ok(names)
    }

    /// Run an aggregation pipeline.
    pub fn pipeline(&self, stages: Vec<Document>) -> Pipe {
        Pipe::new(self.inner.clone(), stages)
    }
}

impl<T: Model + Serialize> Collection<T> {
    /// Insert one record. Identifiers and timestamps must already be set.
    pub async fn insert(&self, record: &T) -> MongoResult<()> {
        let doc = to_document(record)?;
        debug!(collection = %self.name(), "Inserting document");
        self.inner.insert_one(doc, None).await?;
        Ok(())
    }

    /// Replace the record with the given identifier.
    ///
    /// Returns whether a stored record matched.
    pub async fn replace_by_id(&self, id: ObjectId, record: &T) -> MongoResult<bool> {
        let doc = to_document(record)?;
        debug!(collection = %self.name(), id = %id, "Replacing document");
        let result = self
            .inner
            .replace_one(doc! { "_id": id }, doc, None)
            .await?;
        Ok(result.matched_count > 0)
    }
}

/// Translate an index definition into the driver's index model.
///
/// Text indexes key every field as `"text"`; others are ascending.
pub fn index_model(index: &Index) -> IndexModel {
    let mut keys = Document::new();
    for key in &index.key {
        let direction = if index.text {
            Bson::from("text")
        } else {
            Bson::Int32(1)
        };
        keys.insert(key.as_str(), direction);
    }

    let mut options = IndexOptions::default();
    options.name = Some(index.name.clone());
    if index.unique {
        options.unique = Some(true);
    }

    IndexModel::builder().keys(keys).options(options).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_index_model_single_unique() {
        let model = index_model(&Index::new("url", "url").unique(true));
        assert_eq!(model.keys, doc! { "url": 1 });
        let options = model.options.unwrap();
        assert_eq!(options.name.as_deref(), Some("url"));
        assert_eq!(options.unique, Some(true));
    }

    #[test]
    fn test_index_model_composite() {
        let mut index = Index::new("feed_guid", "feed_id");
        index.key.push("guid".to_string());
        let model = index_model(&index);
        assert_eq!(model.keys, doc! { "feed_id": 1, "guid": 1 });
        assert_eq!(model.options.unwrap().unique, None);
    }

    #[test]
    fn test_index_model_text() {
        let model = index_model(&Index::new("title", "title").text(true));
        assert_eq!(model.keys, doc! { "title": "text" });
    }
}
