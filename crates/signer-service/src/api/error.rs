//! API error types and responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use crate::core::SigningError;

const UNEXPECTED_ERROR: &str = "Unexpected error.";

/// API error type
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Invalid credential: {0}")]
    InvalidCredential(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Detail is logged, never sent to the client
    #[error("Internal error: {0}")]
    Internal(String),
}

/// API error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::InvalidCredential(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_CREDENTIAL", msg)
            }
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg),
            ApiError::Internal(detail) => {
                error!(detail = %detail, "Request failed with internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    UNEXPECTED_ERROR.to_string(),
                )
            }
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<SigningError> for ApiError {
    fn from(err: SigningError) -> Self {
        match err {
            SigningError::MissingField(field) => {
                ApiError::BadRequest(format!("Field '{}' is required.", field))
            }
            SigningError::MalformedCredential(_) => ApiError::InvalidCredential("Invalid JWT.".into()),
            SigningError::MissingIdentityClaim => {
                ApiError::InvalidCredential("Missing sub claim in JWT.".into())
            }
            SigningError::Unauthorized => {
                ApiError::Unauthorized("Signature does not belong to the user.".into())
            }
            err @ (SigningError::CorruptRecord { .. } | SigningError::StorageUnavailable(_)) => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageError;

    fn status_of(err: SigningError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_of(SigningError::MissingField("jwt")), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(SigningError::MalformedCredential("bad".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(SigningError::MissingIdentityClaim), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(SigningError::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_of(SigningError::CorruptRecord { id: 1, reason: "eof".into() }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(SigningError::StorageUnavailable(StorageError::Connection("down".into()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages() {
        match ApiError::from(SigningError::MissingField("user_id")) {
            ApiError::BadRequest(msg) => assert_eq!(msg, "Field 'user_id' is required."),
            other => panic!("unexpected {:?}", other),
        }
        match ApiError::from(SigningError::MalformedCredential("signature does not verify".into())) {
            ApiError::InvalidCredential(msg) => assert_eq!(msg, "Invalid JWT."),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_corrupt_record_stays_internal() {
        let err = ApiError::from(SigningError::CorruptRecord {
            id: 7,
            reason: "expected value".into(),
        });
        assert!(matches!(err, ApiError::Internal(ref detail) if detail.contains("7")));
    }
}
