//! Filter document building.

use bson::{Bson, Document, doc};

/// Fluent builder for store filter documents.
///
/// ```rust,ignore
/// let filter = FilterBuilder::new()
///     .eq("category", "Technology")
///     .text_search("rust")
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilterBuilder {
    doc: Document,
}

impl FilterBuilder {
    /// Create a new empty filter builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality condition.
    pub fn eq(mut self, field: &str, value: impl Into<Bson>) -> Self {
        self.doc.insert(field, value.into());
        self
    }

    /// Full-text search. Needs a text index on the collection.
    pub fn text_search(mut self, search: &str) -> Self {
        self.doc.insert("$text", doc! { "$search": search });
        self
    }

    /// Build the filter document.
    pub fn build(self) -> Document {
        self.doc
    }
}
