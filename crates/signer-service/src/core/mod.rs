//! Core logic for the signing service

mod error;
mod service;

pub use error::SigningError;
pub use service::{SignOutcome, SignatureService, VerifiedAnswers};
