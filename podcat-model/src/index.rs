//! Index definitions derived from field annotations.

/// A named index over one or more storage keys.
///
/// Fields sharing an index name form a composite index, keyed in the order
/// the fields were declared. The first such field decides `unique` and `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    /// Index name.
    pub name: String,
    /// Storage names of the indexed fields.
    pub key: Vec<String>,
    /// Entries must be unique.
    pub unique: bool,
    /// Full-text index.
    pub text: bool,
}

impl Index {
    /// Create a single-key index.
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: vec![key.into()],
            unique: false,
            text: false,
        }
    }

    /// Set the uniqueness flag.
    pub fn unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    /// Set the full-text flag.
    pub fn text(mut self, text: bool) -> Self {
        self.text = text;
        self
    }

    /// Check if the index spans more than one field.
    pub fn is_composite(&self) -> bool {
        self.key.len() > 1
    }
}
