//! Router assembly with the full middleware stack.

use axum::{Router, body::Body};
use http::{HeaderValue, StatusCode};
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::{ConfigError, ServerConfig};
use crate::middleware::request_id::{
    propagate_request_id_layer, request_span, set_request_id_layer,
};
use crate::routes;
use crate::state::AppState;

/// Build the application: routes plus tracing, CORS, request IDs, a
/// per-request timeout and a global concurrency ceiling.
pub fn build_app(state: AppState) -> Result<Router, ConfigError> {
    let config = state.config().clone();
    apply_middleware(routes::build_router(state), &config)
}

/// Wrap a router in the server's middleware stack.
///
/// Outermost first: request ID assignment, request ID propagation, tracing,
/// CORS, timeout, concurrency ceiling.
pub fn apply_middleware(router: Router, config: &ServerConfig) -> Result<Router, ConfigError> {
    let cors = build_cors_layer(&config.cors_allowed_origins)?;

    Ok(router
        .layer(GlobalConcurrencyLimitLayer::new(
            config.max_concurrent_requests,
        ))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(request_span::<Body>))
        .layer(propagate_request_id_layer())
        .layer(set_request_id_layer()))
}

/// Build CORS layer from configuration.
///
/// `*` alone allows any origin. Otherwise the value is a comma-separated
/// list of exact origins, and a `*` inside that list is an error.
pub fn build_cors_layer(allowed_origins: &str) -> Result<CorsLayer, ConfigError> {
    if allowed_origins.trim() == "*" {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    let invalid = |reason: String| ConfigError::InvalidValue {
        name: "CORS_ALLOWED_ORIGINS".to_string(),
        reason,
    };

    // Parse comma-separated origins
    let origins = allowed_origins
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            if s == "*" {
                return Err(invalid(
                    "wildcard cannot be combined with explicit origins".to_string(),
                ));
            }
            s.parse::<HeaderValue>()
                .map_err(|e| invalid(format!("{s}: {e}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any))
}
