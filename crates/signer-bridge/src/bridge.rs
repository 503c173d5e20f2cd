//! Identity extraction seam

use crate::error::Result;
use crate::types::VerifiedIdentity;

/// Trait for identity extractors
///
/// Extraction must be a pure function of the credential and the
/// extractor's configuration: no I/O, no side effects.
pub trait IdentityExtractor: Send + Sync {
    /// Verify a credential and extract its identity
    ///
    /// # Returns
    /// * `Ok(VerifiedIdentity)` - the credential verified and has a subject
    /// * `Err(BridgeError::MalformedCredential)` - parse or signature failure
    /// * `Err(BridgeError::MissingIdentityClaim)` - verified, but no subject
    fn extract(&self, credential: &str) -> Result<VerifiedIdentity>;

    /// Get a description of this extractor (for logging)
    fn description(&self) -> &str {
        "identity extractor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BridgeError;
    use std::sync::Arc;

    struct FixedExtractor;

    impl IdentityExtractor for FixedExtractor {
        fn extract(&self, credential: &str) -> Result<VerifiedIdentity> {
            if credential.is_empty() {
                return Err(BridgeError::MissingIdentityClaim);
            }
            Ok(VerifiedIdentity::new(format!("fixed:{}", credential)))
        }
    }

    #[test]
    fn test_default_description() {
        assert_eq!(FixedExtractor.description(), "identity extractor");
    }

    #[test]
    fn test_usable_as_trait_object() {
        let extractor: Arc<dyn IdentityExtractor> = Arc::new(FixedExtractor);
        assert_eq!(extractor.extract("abc").unwrap().subject, "fixed:abc");
        assert_eq!(extractor.extract("").unwrap_err(), BridgeError::MissingIdentityClaim);
    }
}
