//! Model descriptors built from field annotations.

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::trace;

use crate::annotation::{FieldTags, OMIT_EMPTY, TEXT, UNIQUE, parse_annotation};
use crate::index::Index;
use crate::Model;

/// Mapping metadata for one record field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldInfo {
    /// Rust field name.
    pub field: String,

    /// External (API) name.
    pub json_name: String,
    /// Omit from API output when empty.
    pub json_omit_empty: bool,

    /// Storage name.
    pub bson_name: String,
    /// Omit from storage when empty.
    pub bson_omit_empty: bool,

    /// Index this field participates in. Empty when not indexed.
    pub index_name: String,
    /// The index is unique.
    pub index_unique: bool,
    /// The index is a full-text index.
    pub index_text: bool,
}

impl FieldInfo {
    /// Parse the annotations of one field.
    ///
    /// An `index` annotation without a name falls back to the storage name,
    /// so `index = ",unique"` creates a single-field unique index.
    pub fn parse(tags: &FieldTags) -> Self {
        let mut info = FieldInfo {
            field: tags.field.to_string(),
            ..Default::default()
        };

        if let Some(json) = parse_annotation(tags.json) {
            info.json_name = json.name.to_string();
            info.json_omit_empty = json.has_option(OMIT_EMPTY);
        }

        if let Some(bson) = parse_annotation(tags.bson) {
            info.bson_name = bson.name.to_string();
            info.bson_omit_empty = bson.has_option(OMIT_EMPTY);
        }

        if let Some(index) = parse_annotation(tags.index) {
            info.index_name = if index.name.is_empty() {
                info.bson_name.clone()
            } else {
                index.name.to_string()
            };
            info.index_unique = index.has_option(UNIQUE);
            info.index_text = index.has_option(TEXT);
        }

        info
    }

    /// Check if the field is part of an index.
    pub fn is_indexed(&self) -> bool {
        !self.index_name.is_empty()
    }
}

/// Immutable mapping metadata for one record type.
///
/// Only fields with both an external and a storage name are tracked; the rest
/// are invisible to lookups, queries and index provisioning. When two fields
/// share a name, the later one wins the lookup entry.
///
/// Fields holding embedded records carry the descriptor of that record type,
/// built together with this one. Embedded types must not contain themselves.
#[derive(Debug, Clone, Default)]
pub struct ModelInfo {
    name: &'static str,
    fields: Vec<FieldInfo>,
    json_names: HashMap<String, usize>,
    bson_names: HashMap<String, usize>,
    indexes: IndexMap<String, Index>,
    nested: HashMap<usize, Arc<ModelInfo>>,
}

impl ModelInfo {
    /// Build a descriptor from raw field annotations in declaration order.
    pub fn build(name: &'static str, tags: &[FieldTags]) -> Self {
        let mut info = ModelInfo {
            name,
            ..Default::default()
        };

        for tag in tags {
            let field = FieldInfo::parse(tag);
            if field.json_name.is_empty() || field.bson_name.is_empty() {
                trace!(model = name, field = tag.field, "Skipping unmapped field");
                continue;
            }

            if field.is_indexed() {
                match info.indexes.get_mut(&field.index_name) {
                    Some(idx) => idx.key.push(field.bson_name.clone()),
                    None => {
                        let idx = Index::new(&field.index_name, &field.bson_name)
                            .unique(field.index_unique)
                            .text(field.index_text);
                        info.indexes.insert(field.index_name.clone(), idx);
                    }
                }
            }

            if let Some(nested) = tag.nested {
                info.nested.insert(info.fields.len(), Arc::new(nested()));
            }
            info.add_field(field);
        }

        info
    }

    /// Build the descriptor of a [`Model`] type.
    pub fn of<T: Model>() -> Self {
        T::model_info()
    }

    fn add_field(&mut self, field: FieldInfo) {
        let pos = self.fields.len();
        self.json_names.insert(field.json_name.clone(), pos);
        self.bson_names.insert(field.bson_name.clone(), pos);
        self.fields.push(field);
    }

    /// Name of the record type.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Mapped fields in declaration order.
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    /// Index definitions in order of first declaration.
    pub fn indexes(&self) -> impl Iterator<Item = &Index> {
        self.indexes.values()
    }

    /// Get an index definition by name.
    pub fn index(&self, name: &str) -> Option<&Index> {
        self.indexes.get(name)
    }

    /// Position of the field with the given external name.
    pub fn api_position(&self, name: &str) -> Option<usize> {
        self.json_names.get(name).copied()
    }

    /// Position of the field with the given storage name.
    pub fn db_position(&self, name: &str) -> Option<usize> {
        self.bson_names.get(name).copied()
    }

    /// Descriptor of the record type embedded in the field at `pos`.
    pub fn nested(&self, pos: usize) -> Option<&ModelInfo> {
        self.nested.get(&pos).map(Arc::as_ref)
    }

    /// Look up a field by its external name.
    pub fn lookup_api_name(&self, name: &str) -> Option<&FieldInfo> {
        self.api_position(name).map(|i| &self.fields[i])
    }

    /// Look up a field by its storage name.
    pub fn lookup_db_name(&self, name: &str) -> Option<&FieldInfo> {
        self.db_position(name).map(|i| &self.fields[i])
    }
}
