//! Core types for the credential bridge

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An identity extracted from a verified credential
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedIdentity {
    /// Subject claim; this is the identity records are stored under
    pub subject: String,

    /// Issuer claim, if the credential carried one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,

    /// When the credential expires, if it carried `exp`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl VerifiedIdentity {
    /// Create a new identity
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            issuer: None,
            expires_at: None,
        }
    }

    /// Set issuer
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Set expiration time
    pub fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let expires = Utc::now();
        let identity = VerifiedIdentity::new("test-id")
            .with_issuer("https://issuer.example.com")
            .with_expires_at(expires);

        assert_eq!(identity.subject, "test-id");
        assert_eq!(identity.issuer.as_deref(), Some("https://issuer.example.com"));
        assert_eq!(identity.expires_at, Some(expires));
    }

    #[test]
    fn test_optional_fields_skipped() {
        let json = serde_json::to_value(VerifiedIdentity::new("alice")).unwrap();
        assert_eq!(json, serde_json::json!({"subject": "alice"}));
    }
}
