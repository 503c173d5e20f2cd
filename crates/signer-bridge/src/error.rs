//! Error types for the credential bridge

use thiserror::Error;

/// Result type for credential bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Errors that can occur while extracting an identity
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// Token could not be parsed, or did not verify against the configured key
    #[error("Malformed credential: {0}")]
    MalformedCredential(String),

    /// Token verified but carries no subject
    #[error("Missing identity claim")]
    MissingIdentityClaim,
}

impl From<jsonwebtoken::errors::Error> for BridgeError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;
        let detail = match err.kind() {
            ErrorKind::InvalidSignature => "signature does not verify".to_string(),
            ErrorKind::ExpiredSignature => "credential expired".to_string(),
            ErrorKind::ImmatureSignature => "credential not yet valid".to_string(),
            ErrorKind::InvalidAlgorithm => "algorithm not accepted".to_string(),
            _ => err.to_string(),
        };
        BridgeError::MalformedCredential(detail)
    }
}
