//! Credential Bridge
//!
//! Turns an opaque bearer credential into the identity that owns a signed
//! answer set.
//!
//! ## Trust boundary
//!
//! The identity is the credential's `sub` claim. It is only as trustworthy
//! as the key that signed the credential: this service holds that key
//! (a pre-shared HMAC secret) and rejects anything that does not verify
//! against it. There is no further authentication step.
//!
//! ## Usage
//!
//! ```ignore
//! use signer_bridge::{IdentityExtractor, JwtExtractor, JwtExtractorConfig};
//!
//! let extractor = JwtExtractor::new(JwtExtractorConfig::new("shared-secret"));
//! let identity = extractor.extract("eyJ...")?;
//! println!("Subject: {}", identity.subject);
//! ```

pub mod bridge;
pub mod error;
pub mod handlers;
pub mod types;

pub use bridge::IdentityExtractor;
pub use error::{BridgeError, Result};
pub use handlers::{JwtExtractor, JwtExtractorConfig, MockExtractor};
pub use types::VerifiedIdentity;
