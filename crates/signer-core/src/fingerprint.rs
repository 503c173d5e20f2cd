//! Fingerprint engine
//!
//! A fingerprint is SHA-256 over the canonical JSON document
//!
//! ```text
//! {"jwt":<credential>,"answers":{<key>:<value>,...}}
//! ```
//!
//! written compactly, with `jwt` first and answer keys in ascending byte
//! order. String escaping follows JSON, so the document is injective: no
//! credential can be crafted that collides with a different answer set.
//!
//! The digest is rendered as 64 lowercase hex characters.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::types::Answers;

/// Length of a rendered fingerprint (hex encoded SHA-256)
pub const FINGERPRINT_LEN: usize = 64;

/// Deterministic fingerprint committing to a credential and an answer set
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Compute the fingerprint of a submission
    pub fn compute(credential: &str, answers: &Answers) -> Self {
        let document = canonical_document(credential, answers);
        let digest = Sha256::digest(document.as_bytes());
        Self(hex::encode(digest))
    }

    /// Get the hex string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the hex string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Fingerprint {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

/// Build the canonical document that gets hashed.
///
/// `Answers` iterates in key order, and `Value`'s `Display` is infallible,
/// so this never fails for string-to-string input.
pub fn canonical_document(credential: &str, answers: &Answers) -> String {
    let entries: Map<String, Value> = answers
        .iter()
        .map(|(key, value)| (key.clone(), Value::String(value.clone())))
        .collect();

    format!(
        "{{\"jwt\":{},\"answers\":{}}}",
        Value::String(credential.to_owned()),
        Value::Object(entries)
    )
}
