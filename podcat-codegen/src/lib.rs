//! Procedural macros for podcast catalog models.
//!
//! # Macros
//!
//! - [`Model`] - Derive mapping metadata and change-copy for a record struct
//!
//! # Example
//!
//! ```rust,ignore
//! #[derive(Debug, Clone, PartialEq, podcat::Model)]
//! pub struct Item {
//!     #[model(json = "guid", bson = "guid", index = "guid_idx,unique")]
//!     pub guid: String,
//!     #[model(json = "title,omitempty", bson = "title")]
//!     pub title: String,
//!     // No annotations: copied, but invisible to lookups and indexes.
//!     pub scratch: u32,
//! }
//! ```

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod generators;

/// Derive macro for catalog record types.
///
/// Generates `podcat_model::Model` (the raw annotation strings of every named
/// field, in declaration order) and `podcat_model::CopyModel` (field-wise
/// change-copy over the public fields).
///
/// # Attributes
///
/// ## Struct-level
/// - `#[model(name = "Name")]` - Override the model name used in diagnostics
/// - `#[model(crate = "path")]` - Path to `podcat_model` when re-exported
///
/// ## Field-level
/// - `#[model(json = "name[,omitempty]")]` - External (API) name
/// - `#[model(bson = "name[,omitempty]")]` - Storage name
/// - `#[model(index = "[name][,unique][,text]")]` - Index participation
/// - `#[model(nested = "Type")]` - Embedded `Model` type (or element type of a
///   list), rendered through its own descriptor
/// - `#[model(skip_copy)]` - Never copied by `CopyModel`
///
/// Field types of copied fields must implement `PartialEq` and `Clone`.
#[proc_macro_derive(Model, attributes(model))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match generators::derive_model_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
