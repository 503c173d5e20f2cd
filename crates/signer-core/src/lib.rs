//! # Signer Core
//!
//! Domain types and the fingerprint algorithm for the answer signing service.
//!
//! ## Key Concepts
//!
//! - **Answers**: a question-key to answer-value mapping, always held in
//!   byte order so that serialization is canonical
//! - **Fingerprint**: SHA-256 over the canonical `{jwt, answers}` document,
//!   hex encoded. It commits to the full credential, not just its subject
//! - **Signature record**: the persisted `{identity, fingerprint, answers,
//!   timestamp}` tuple
//!
//! ## Determinism
//!
//! Two submissions with the same credential string and the same answer
//! entries produce the same fingerprint on every platform and across
//! restarts. Entry order of the caller's input does not matter.

pub mod error;
pub mod fingerprint;
pub mod timestamp;
pub mod types;

pub use error::{CoreError, Result};
pub use fingerprint::Fingerprint;
pub use types::{decode_answers, encode_answers, Answers, NewSignatureRecord, SignatureRecord};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
