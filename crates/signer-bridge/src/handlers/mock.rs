//! Mock Identity Extractor
//!
//! For testing purposes - accepts any credential without verification.

use crate::bridge::IdentityExtractor;
use crate::error::{BridgeError, Result};
use crate::types::VerifiedIdentity;

/// Mock identity extractor for testing
///
/// Accepts credentials in the format:
/// - "subject" - Extracts that subject verbatim
/// - "FAIL:message" - Rejects the credential as malformed
/// - "" - Rejects the credential as having no subject
#[derive(Debug, Default)]
pub struct MockExtractor;

impl MockExtractor {
    /// Create a new mock extractor
    pub fn new() -> Self {
        Self
    }
}

impl IdentityExtractor for MockExtractor {
    fn description(&self) -> &str {
        "mock identity extractor"
    }

    fn extract(&self, credential: &str) -> Result<VerifiedIdentity> {
        if let Some(message) = credential.strip_prefix("FAIL:") {
            return Err(BridgeError::MalformedCredential(message.to_string()));
        }

        if credential.is_empty() {
            return Err(BridgeError::MissingIdentityClaim);
        }

        Ok(VerifiedIdentity::new(credential).with_issuer("mock"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_credential() {
        let identity = MockExtractor::new().extract("alice").unwrap();
        assert_eq!(identity.subject, "alice");
        assert_eq!(identity.issuer.as_deref(), Some("mock"));
    }

    #[test]
    fn test_explicit_failure() {
        match MockExtractor::new().extract("FAIL:test error") {
            Err(BridgeError::MalformedCredential(msg)) => assert_eq!(msg, "test error"),
            other => panic!("Expected MalformedCredential, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_credential() {
        assert_eq!(
            MockExtractor::new().extract(""),
            Err(BridgeError::MissingIdentityClaim)
        );
    }
}
