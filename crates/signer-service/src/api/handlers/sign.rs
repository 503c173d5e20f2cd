//! Answer signing handler
//!
//! Accepts a credential and an answer set, returns the fingerprint that now
//! stands as the signature for that identity.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use signer_core::Answers;

use super::{json_body, AppState};
use crate::api::error::ApiError;

/// Request to sign a set of answers
#[derive(Debug, Deserialize)]
pub struct SignAnswerRequest {
    /// Bearer credential naming the subject
    #[serde(default)]
    pub jwt: String,

    /// Question to answer mapping
    #[serde(default)]
    pub answers: Answers,
}

/// Response carrying the new signature
#[derive(Debug, Serialize, Deserialize)]
pub struct SignAnswerResponse {
    /// Lowercase hex SHA-256 fingerprint
    pub test_signature: String,
}

/// Sign an answer set on behalf of the credential's subject
///
/// POST /answer
pub async fn sign_answer(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SignAnswerRequest>, JsonRejection>,
) -> Result<Json<SignAnswerResponse>, ApiError> {
    let request = json_body(body)?;
    debug!(answer_count = request.answers.len(), "Sign request received");

    let outcome = state.service.sign(&request.jwt, &request.answers).await?;

    Ok(Json(SignAnswerResponse {
        test_signature: outcome.fingerprint.into_string(),
    }))
}
