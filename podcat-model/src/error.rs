//! Error types for model metadata.

use thiserror::Error;

/// Result type for model metadata operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Contract violations in how record types are set up or used.
///
/// These indicate a programming error (a type that was never registered,
/// for example), not a runtime condition worth retrying.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// The model type was never registered with the registry in use.
    #[error("model `{0}` is not registered")]
    Unregistered(&'static str),
}

impl ModelError {
    /// Create an unregistered model error.
    pub fn unregistered(model: &'static str) -> Self {
        Self::Unregistered(model)
    }

    /// Check if this is an unregistered model error.
    pub fn is_unregistered(&self) -> bool {
        matches!(self, Self::Unregistered(_))
    }
}
