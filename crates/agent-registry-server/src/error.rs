//! API error types with JSON responses.

use agent_registry_core::DenialKind;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// API error that can be returned from handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Bad request (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Registration refused by the admission pipeline.
    #[error("{}", denial_message(.kind, .detail))]
    Denied { kind: DenialKind, detail: String },
}

fn denial_message(kind: &DenialKind, detail: &str) -> String {
    match kind {
        DenialKind::MissingField => format!("Missing or empty required field: {detail}"),
        DenialKind::InvalidName => "Agent name must be alphanumeric.".to_string(),
        DenialKind::ProofFailed => {
            "Cryptographic proof verification failed or service unavailable.".to_string()
        }
    }
}

impl ApiError {
    /// Get the error code string for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Denied { kind, .. } => kind.code(),
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Denied { kind, .. } => match kind {
                DenialKind::MissingField | DenialKind::InvalidName => StatusCode::BAD_REQUEST,
                DenialKind::ProofFailed => StatusCode::UNAUTHORIZED,
            },
        }
    }
}

/// JSON error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error details.
    pub error: ErrorDetails,
}

/// Error details within the response.
#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    /// Error code (e.g., "MISSING_FIELD", "PROOF_FAILED").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = ErrorResponse {
            error: ErrorDetails {
                code: self.code().to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
