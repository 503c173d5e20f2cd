//! Signature verification handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use signer_core::Answers;

use super::{json_body, AppState};
use crate::api::error::ApiError;

/// Request to verify that a signature belongs to an identity
#[derive(Debug, Deserialize)]
pub struct VerifySignatureRequest {
    #[serde(default)]
    pub user_id: String,

    #[serde(default)]
    pub signature: String,
}

/// Answers and signing time of the matched record
#[derive(Debug, Serialize, Deserialize)]
pub struct VerifySignatureResponse {
    pub answers: Answers,

    /// RFC 3339, UTC, whole seconds
    pub timestamp: String,
}

/// Verify a signature
///
/// POST /signature/verify
pub async fn verify_signature(
    State(state): State<Arc<AppState>>,
    body: Result<Json<VerifySignatureRequest>, JsonRejection>,
) -> Result<Json<VerifySignatureResponse>, ApiError> {
    let request = json_body(body)?;

    let verified = state
        .service
        .verify(&request.user_id, &request.signature)
        .await?;

    Ok(Json(VerifySignatureResponse {
        answers: verified.answers,
        timestamp: verified.timestamp,
    }))
}
