//! Common types used across the signing service

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::Result;

/// Question key to answer value.
///
/// A `BTreeMap` keeps keys in ascending byte order, which is what makes
/// both the fingerprint document and the stored blob canonical.
pub type Answers = BTreeMap<String, String>;

/// A persisted signature record
///
/// Records are created once per successful sign request and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureRecord {
    /// Store-assigned, monotonically increasing
    pub id: i64,

    /// Subject extracted from the signing credential
    pub identity: String,

    /// Hex fingerprint returned to the caller at signing time
    pub fingerprint: String,

    /// Answers as a JSON object (see [`encode_answers`])
    pub answers: String,

    /// UTC time of signing (see [`crate::timestamp`])
    pub timestamp: String,
}

/// A record that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSignatureRecord {
    pub identity: String,
    pub fingerprint: String,
    pub answers: String,
    pub timestamp: String,
}

impl NewSignatureRecord {
    /// Attach the id assigned by a store
    pub fn with_id(self, id: i64) -> SignatureRecord {
        SignatureRecord {
            id,
            identity: self.identity,
            fingerprint: self.fingerprint,
            answers: self.answers,
            timestamp: self.timestamp,
        }
    }
}

impl SignatureRecord {
    /// Decode the stored answers
    pub fn decode_answers(&self) -> Result<Answers> {
        decode_answers(&self.answers)
    }
}

/// Encode answers for storage
pub fn encode_answers(answers: &Answers) -> String {
    // Same canonical rendering as the fingerprint document
    serde_json::Value::Object(
        answers
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect(),
    )
    .to_string()
}

/// Decode answers from storage
pub fn decode_answers(blob: &str) -> Result<Answers> {
    Ok(serde_json::from_str(blob)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_is_sorted() {
        let mut answers = Answers::new();
        answers.insert("zeta".into(), "last".into());
        answers.insert("alpha".into(), "first".into());

        assert_eq!(encode_answers(&answers), r#"{"alpha":"first","zeta":"last"}"#);
    }

    #[test]
    fn test_decode_stored_blob() {
        let answers = decode_answers(r#"{"question":"answer"}"#).unwrap();
        assert_eq!(answers.get("question").map(String::as_str), Some("answer"));
    }

    #[test]
    fn test_decode_rejects_non_string_values() {
        assert!(decode_answers(r#"{"question":42}"#).is_err());
        assert!(decode_answers("not json").is_err());
        assert!(decode_answers("[]").is_err());
    }

    #[test]
    fn test_with_id() {
        let record = NewSignatureRecord {
            identity: "alice".into(),
            fingerprint: "ab".into(),
            answers: "{}".into(),
            timestamp: "2024-01-02T15:04:05Z".into(),
        }
        .with_id(7);

        assert_eq!(record.id, 7);
        assert_eq!(record.identity, "alice");
        assert!(record.decode_answers().unwrap().is_empty());
    }
}
