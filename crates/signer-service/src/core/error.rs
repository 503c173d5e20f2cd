//! Error taxonomy for signing and verification

use signer_bridge::BridgeError;
use thiserror::Error;

use crate::storage::StorageError;

/// Errors returned by [`super::SignatureService`]
///
/// Input and credential errors are the caller's to fix. `Unauthorized` is
/// deliberately uninformative: it covers both an unknown identity and a
/// fingerprint that does not belong to a known one. `CorruptRecord` and
/// `StorageUnavailable` are internal failures.
#[derive(Error, Debug)]
pub enum SigningError {
    /// A required input was empty; carries the wire name of the field
    #[error("Field '{0}' is required")]
    MissingField(&'static str),

    #[error("Malformed credential: {0}")]
    MalformedCredential(String),

    #[error("Credential has no subject claim")]
    MissingIdentityClaim,

    #[error("Signature does not belong to the user")]
    Unauthorized,

    /// Stored answers for a matched record could not be decoded
    #[error("Record {id} is corrupt: {reason}")]
    CorruptRecord { id: i64, reason: String },

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] StorageError),
}

impl From<BridgeError> for SigningError {
    fn from(err: BridgeError) -> Self {
        match err {
            BridgeError::MalformedCredential(detail) => SigningError::MalformedCredential(detail),
            BridgeError::MissingIdentityClaim => SigningError::MissingIdentityClaim,
        }
    }
}

impl SigningError {
    /// Whether the failure is internal rather than caused by the request
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            SigningError::CorruptRecord { .. } | SigningError::StorageUnavailable(_)
        )
    }
}
