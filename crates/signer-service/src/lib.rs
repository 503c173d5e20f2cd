//! Answer Signing Service
//!
//! Binds a set of answers to the identity named by a bearer credential and
//! lets anyone holding the resulting fingerprint check it against a claimed
//! identity later:
//! - Extracts the subject from a pre-shared-key JWT
//! - Fingerprints the credential together with the answers
//! - Persists one record per signing, duplicates allowed
//! - Verifies a (identity, fingerprint) pair against the stored records
//!
//! ## API Endpoints
//!
//! - `GET /health` - Liveness check
//! - `GET /ready` - Readiness check with record count
//! - `POST /answer` - Sign an answer set, returns `test_signature`
//! - `POST /signature/verify` - Verify a signature, returns answers and timestamp
//!
//! Credential problems answer 400, a signature that does not belong to the
//! identity answers 401, and storage or data faults answer 500 with a
//! generic body.

pub mod api;
pub mod config;
pub mod core;
pub mod storage;

pub use api::create_router;
pub use api::handlers::{ApiConfig, AppState};
pub use config::{ConfigError, ServiceConfig};
pub use core::{SignOutcome, SignatureService, SigningError, VerifiedAnswers};
pub use storage::{MemoryStore, RecordStore, StorageError};
#[cfg(feature = "sqlite")]
pub use storage::SqliteStore;
