//! # podcat-model
//!
//! Document model metadata for the podcast catalog.
//!
//! A record type declares, per field, three independent annotations:
//!
//! - `json` - the external (API-facing) name, optionally `omitempty`
//! - `bson` - the storage name, optionally `omitempty`
//! - `index` - the index the field participates in, optionally `unique` or `text`
//!
//! Each annotation follows `[<name>][,<option>]*`. The annotations are recorded
//! once per type (usually by `#[derive(Model)]` from `podcat-codegen`) and turned
//! into an immutable [`ModelInfo`] at startup.
//!
//! ## Example
//!
//! ```rust,ignore
//! use podcat::Model;
//!
//! #[derive(Debug, Clone, PartialEq, Model)]
//! pub struct Episode {
//!     #[model(json = "id", bson = "_id,omitempty")]
//!     pub id: Option<ObjectId>,
//!     #[model(json = "title", bson = "title", index = "title_idx,unique")]
//!     pub title: String,
//! }
//!
//! let mut registry = ModelRegistry::new();
//! let info = registry.register::<Episode>();
//! assert_eq!(info.lookup_api_name("id").unwrap().bson_name, "_id");
//! ```

pub mod annotation;
pub mod copy;
pub mod error;
pub mod index;
pub mod info;
pub mod registry;

pub use annotation::{Annotation, FieldTags, parse_annotation};
pub use copy::{CopyModel, copy_field, copy_model};
pub use error::{ModelError, ModelResult};
pub use index::Index;
pub use info::{FieldInfo, ModelInfo};
pub use registry::ModelRegistry;

/// A record type whose persistence metadata is derived from field annotations.
///
/// Implemented by `#[derive(Model)]`; manual implementations only need to list
/// the raw annotation strings of each field in declaration order.
pub trait Model: CopyModel + 'static {
    /// Name of the record type, used in diagnostics.
    const MODEL_NAME: &'static str;

    /// Raw annotations of every named field, in declaration order.
    const FIELD_TAGS: &'static [FieldTags];

    /// Build the descriptor for this type.
    ///
    /// This performs no I/O. Callers normally go through a [`ModelRegistry`]
    /// so the descriptor is built once and shared.
    fn model_info() -> ModelInfo {
        ModelInfo::build(Self::MODEL_NAME, Self::FIELD_TAGS)
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::annotation::FieldTags;
    pub use crate::copy::{CopyModel, copy_model};
    pub use crate::error::{ModelError, ModelResult};
    pub use crate::index::Index;
    pub use crate::info::{FieldInfo, ModelInfo};
    pub use crate::registry::ModelRegistry;
    pub use crate::Model;
}
