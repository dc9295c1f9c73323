//! Field annotation parsing.
//!
//! Annotations use the `encoding/json` style layout `[<name>][,<opt1>][,<opt2>]`.
//! The name can be left out (`",unique"`) while still passing options.

use crate::info::ModelInfo;

/// `omitempty` option of the `json` and `bson` namespaces.
pub const OMIT_EMPTY: &str = "omitempty";

/// `unique` option of the `index` namespace.
pub const UNIQUE: &str = "unique";

/// `text` option of the `index` namespace.
pub const TEXT: &str = "text";

/// Raw annotation strings declared on one record field.
///
/// An empty string means the namespace was not annotated.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldTags {
    /// Rust field name.
    pub field: &'static str,
    /// External (API) annotation.
    pub json: &'static str,
    /// Storage annotation.
    pub bson: &'static str,
    /// Index annotation.
    pub index: &'static str,
    /// Descriptor of the embedded record type, for fields holding one record
    /// or a list of them.
    pub nested: Option<fn() -> ModelInfo>,
}

impl FieldTags {
    /// Create tags for a field with external and storage annotations.
    pub const fn new(field: &'static str, json: &'static str, bson: &'static str) -> Self {
        Self {
            field,
            json,
            bson,
            index: "",
            nested: None,
        }
    }

    /// Attach an index annotation.
    pub const fn index(mut self, index: &'static str) -> Self {
        self.index = index;
        self
    }

    /// Attach the descriptor of an embedded record type.
    pub const fn nested(mut self, nested: fn() -> ModelInfo) -> Self {
        self.nested = Some(nested);
        self
    }
}

/// A parsed annotation for a single namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotation<'a> {
    /// Declared name. Empty when only options were given.
    pub name: &'a str,
    options: Vec<&'a str>,
}

impl<'a> Annotation<'a> {
    /// Check whether `option` was given.
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| *o == option)
    }

    /// Options in declaration order, recognized or not.
    pub fn options(&self) -> &[&'a str] {
        &self.options
    }
}

/// Parse a raw annotation.
///
/// Returns `None` when the namespace has no annotation: the empty string, or a
/// name of `-` (with or without trailing options). Malformed input never fails,
/// it just degrades to fewer recognized pieces.
pub fn parse_annotation(raw: &str) -> Option<Annotation<'_>> {
    if raw.is_empty() {
        return None;
    }

    let mut parts = raw.split(',');
    let name = parts.next().unwrap_or_default();
    if name == "-" {
        return None;
    }

    Some(Annotation {
        name,
        options: parts.filter(|o| !o.is_empty()).collect(),
    })
}
