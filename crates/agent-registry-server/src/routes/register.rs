//! Agent registration endpoint.
//!
//! - POST /api/register — prove possession of a key and receive an address

use agent_registry_core::{AdmissionDecision, RegistrationRequest};
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    routing::post,
};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for registering an agent.
///
/// Every field is optional at the JSON level so that absent, `null` and
/// empty values all surface as a missing-field denial. Sending both `hfp`
/// and `fingerprint` is a duplicate field, so the body is unreadable and
/// the request is a plain bad request.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub agent_name: Option<String>,
    /// Hardware fingerprint. Accepted as `hfp` or `fingerprint`.
    #[serde(default, alias = "hfp")]
    pub fingerprint: Option<String>,
    /// Ed25519 public key as 64-character hex string.
    #[serde(default)]
    pub public_key: Option<String>,
    /// Ed25519 signature as 128-character hex string.
    #[serde(default)]
    pub signature: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl From<RegisterRequest> for RegistrationRequest {
    fn from(body: RegisterRequest) -> Self {
        RegistrationRequest::new(
            body.agent_name.unwrap_or_default(),
            body.fingerprint.unwrap_or_default(),
            body.public_key.unwrap_or_default(),
            body.signature.unwrap_or_default(),
            body.message.unwrap_or_default(),
        )
    }
}

/// Response for a successful registration.
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub status: String,
    pub message: String,
    pub rtc_address: String,
    pub details: RegistrationDetails,
}

/// Details of the admitted agent.
#[derive(Debug, Serialize, Deserialize)]
pub struct RegistrationDetails {
    /// Canonical agent name.
    pub agent: String,
    /// Fingerprint echoed from the request.
    pub hfp: String,
    pub status: String,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /api/register — Register an agent.
async fn register_agent(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let Json(body) = body.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Unreadable registration body");
        ApiError::BadRequest(format!("Missing or invalid request body: {}", rejection.body_text()))
    })?;

    let request = RegistrationRequest::from(body);
    match state.validator().admit(&request) {
        AdmissionDecision::Admitted {
            address,
            canonical_name,
            fingerprint,
        } => Ok((
            StatusCode::CREATED,
            Json(RegisterResponse {
                status: "success".to_string(),
                message: format!("Agent {canonical_name} registered successfully."),
                rtc_address: address.into_string(),
                details: RegistrationDetails {
                    agent: canonical_name,
                    hfp: fingerprint,
                    status: "verified".to_string(),
                },
            }),
        )),
        AdmissionDecision::Denied { kind, detail } => Err(ApiError::Denied { kind, detail }),
    }
}

/// Build registration routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/register", post(register_agent))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_accepts_hfp_alias() {
        let json = r#"{"agent_name": "Node7", "hfp": "abc", "public_key": "00",
                       "signature": "11", "message": "hi"}"#;
        let request: RegisterRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.fingerprint.as_deref(), Some("abc"));

        let json = r#"{"fingerprint": "def"}"#;
        let request: RegisterRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.fingerprint.as_deref(), Some("def"));
    }

    #[test]
    fn test_null_and_absent_fields_become_empty() {
        let json = r#"{"agent_name": null, "message": "hi"}"#;
        let request: RegisterRequest = serde_json::from_str(json).unwrap();
        let request = RegistrationRequest::from(request);
        assert_eq!(request.agent_name, "");
        assert_eq!(request.signature, "");
        assert_eq!(request.message, "hi");
    }

    #[test]
    fn test_register_response_serialize() {
        let response = RegisterResponse {
            status: "success".to_string(),
            message: "Agent node7 registered successfully.".to_string(),
            rtc_address: "RTC-node7-deadbeef".to_string(),
            details: RegistrationDetails {
                agent: "node7".to_string(),
                hfp: "abc".to_string(),
                status: "verified".to_string(),
            },
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["rtc_address"], "RTC-node7-deadbeef");
        assert_eq!(json["details"]["hfp"], "abc");
    }
}
