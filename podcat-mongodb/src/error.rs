//! Error types for store operations.

use podcat_model::ModelError;
use thiserror::Error;

/// Result type for store operations.
pub type MongoResult<T> = Result<T, MongoError>;

/// Errors that can occur during store operations.
///
/// Driver and BSON failures are passed through untouched; this layer neither
/// retries nor translates them.
#[derive(Error, Debug)]
pub enum MongoError {
    /// MongoDB driver error.
    #[error("mongodb error: {0}")]
    Driver(#[from] mongodb::error::Error),

    /// BSON serialization error.
    #[error("bson error: {0}")]
    Bson(#[from] bson::ser::Error),

    /// BSON deserialization error.
    #[error("bson deserialization error: {0}")]
    BsonDe(#[from] bson::de::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// No document matched.
    #[error("document not found: {0}")]
    NotFound(String),

    /// The caller broke a usage contract (for example an unregistered model).
    #[error("contract violation: {0}")]
    Contract(#[from] ModelError),
}

impl MongoError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Check if this is a not found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this is a contract violation rather than a store failure.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::Contract(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = MongoError::config("invalid URI");
        assert!(matches!(err, MongoError::Config(_)));

        let err = MongoError::not_found("Feed");
        assert!(err.is_not_found());
        assert!(!err.is_contract_violation());
    }

    #[test]
    fn test_error_display() {
        let err = MongoError::config("test error");
        assert_eq!(err.to_string(), "configuration error: test error");

        let err = MongoError::NotFound("Log".to_string());
        assert_eq!(err.to_string(), "document not found: Log");
    }

    #[test]
    fn test_contract_violation_from_model_error() {
        let err: MongoError = ModelError::unregistered("Feed").into();
        assert!(err.is_contract_violation());
        assert_eq!(
            err.to_string(),
            "contract violation: model `Feed` is not registered"
        );
    }
}
