//! Error types for signer core

use thiserror::Error;

/// Result type alias using CoreError
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur while handling fingerprints and stored answers
#[derive(Error, Debug)]
pub enum CoreError {
    /// Stored answers could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Timestamp does not match the record format
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Serialization(err.to_string())
    }
}
