//! Health check endpoint.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Whether a signature primitive is installed ("available" or "unavailable").
    pub verifier: String,
}

/// GET /health - Health check endpoint.
///
/// Stays 200 with an unavailable verifier; the process is alive, it just
/// refuses every registration.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let verifier = if state.validator().verifier().is_available() {
        "available"
    } else {
        "unavailable"
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        service: state.config().service_name.clone(),
        verifier: verifier.to_string(),
    })
}

/// Build health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_registry_core::{ProofVerifier, RegistrationValidator};

    use crate::config::ServerConfig;

    #[tokio::test]
    async fn test_health_check() {
        let state = AppState::new(RegistrationValidator::default(), ServerConfig::default());
        let response = health_check(State(state)).await;
        assert_eq!(response.status, "ok");
        assert_eq!(response.service, "rustchain-agent-registry");
        assert_eq!(response.verifier, "available");
    }

    #[tokio::test]
    async fn test_health_reports_missing_verifier() {
        let state = AppState::new(
            RegistrationValidator::new(ProofVerifier::unavailable()),
            ServerConfig::default(),
        );
        let response = health_check(State(state)).await;
        assert_eq!(response.status, "ok");
        assert_eq!(response.verifier, "unavailable");
    }
}
