//! API request handlers

pub mod sign;
pub mod verify;

use axum::{extract::rejection::JsonRejection, Json};
use std::time::Duration;
use tracing::debug;

use crate::api::error::ApiError;
use crate::core::SignatureService;

pub use sign::{sign_answer, SignAnswerRequest, SignAnswerResponse};
pub use verify::{verify_signature, VerifySignatureRequest, VerifySignatureResponse};

/// HTTP layer settings
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Upper bound on a single request, after which 408 is returned
    pub request_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Application state shared across handlers
pub struct AppState {
    /// Signing and verification coordinator
    pub service: SignatureService,
    /// HTTP layer settings
    pub config: ApiConfig,
}

/// Unwrap a JSON body, collapsing every rejection into a single client error.
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            debug!(reason = %rejection.body_text(), "Rejected request body");
            Err(ApiError::BadRequest("Invalid request.".into()))
        }
    }
}
