//! Signing and verification coordinator
//!
//! `sign` binds an answer set to the identity in a credential and records
//! it. `verify` releases the recorded answers to whoever can name both the
//! identity and a fingerprint issued to it.

use signer_bridge::IdentityExtractor;
use signer_core::{encode_answers, timestamp, Answers, Fingerprint, NewSignatureRecord};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::error::SigningError;
use crate::storage::RecordStore;

/// Result of a successful sign request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignOutcome {
    /// Fingerprint handed back to the caller
    pub fingerprint: Fingerprint,
    /// Id the store assigned to the new record
    pub record_id: i64,
    /// Identity the record is owned by
    pub identity: String,
    /// Recorded signing time
    pub timestamp: String,
}

/// Result of a successful verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedAnswers {
    pub answers: Answers,
    pub timestamp: String,
}

/// Coordinates identity extraction, fingerprinting and the record store
///
/// Stateless per call; safe to share across requests.
#[derive(Clone)]
pub struct SignatureService {
    extractor: Arc<dyn IdentityExtractor>,
    store: Arc<dyn RecordStore>,
}

impl SignatureService {
    /// Create a service from its collaborators
    pub fn new(extractor: Arc<dyn IdentityExtractor>, store: Arc<dyn RecordStore>) -> Self {
        debug!(extractor = extractor.description(), store = ?store, "Signature service created");
        Self { extractor, store }
    }

    /// Get the record store
    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// Sign an answer set on behalf of the credential's subject.
    ///
    /// Not idempotent: every call appends a new record, even when the
    /// fingerprint repeats.
    pub async fn sign(&self, credential: &str, answers: &Answers) -> Result<SignOutcome, SigningError> {
        if credential.is_empty() {
            return Err(SigningError::MissingField("jwt"));
        }
        if answers.is_empty() {
            return Err(SigningError::MissingField("answers"));
        }

        let identity = self.extractor.extract(credential)?;
        let fingerprint = Fingerprint::compute(credential, answers);
        let timestamp = timestamp::now();

        let record = NewSignatureRecord {
            identity: identity.subject.clone(),
            fingerprint: fingerprint.to_string(),
            answers: encode_answers(answers),
            timestamp: timestamp.clone(),
        };

        let record_id = self.store.create(record).await.map_err(|e| {
            error!(identity = %identity.subject, error = %e, "Unable to store signature");
            SigningError::from(e)
        })?;

        info!(
            record_id = record_id,
            identity = %identity.subject,
            answer_count = answers.len(),
            "Signed answers"
        );

        Ok(SignOutcome {
            fingerprint,
            record_id,
            identity: identity.subject,
            timestamp,
        })
    }

    /// Release the answers recorded under `fingerprint` for `identity`.
    ///
    /// An unknown identity and a fingerprint owned by someone else both
    /// yield [`SigningError::Unauthorized`].
    pub async fn verify(&self, identity: &str, fingerprint: &str) -> Result<VerifiedAnswers, SigningError> {
        if identity.is_empty() {
            return Err(SigningError::MissingField("user_id"));
        }
        if fingerprint.is_empty() {
            return Err(SigningError::MissingField("signature"));
        }

        let mut records = self.store.find_by_identity(identity).await.map_err(|e| {
            error!(identity = %identity, error = %e, "Unable to load signatures");
            SigningError::from(e)
        })?;

        // Store order is unspecified; ids are monotonic
        records.sort_by_key(|r| r.id);
        let candidates = records.len();

        let Some(record) = records.into_iter().find(|r| r.fingerprint == fingerprint) else {
            warn!(identity = %identity, candidates = candidates, "Signature does not belong to the user");
            return Err(SigningError::Unauthorized);
        };

        let answers = record.decode_answers().map_err(|e| {
            error!(record_id = record.id, error = %e, "Stored answers cannot be decoded");
            SigningError::CorruptRecord {
                id: record.id,
                reason: e.to_string(),
            }
        })?;

        info!(record_id = record.id, identity = %identity, "Signature verified");

        Ok(VerifiedAnswers {
            answers,
            timestamp: record.timestamp,
        })
    }
}
