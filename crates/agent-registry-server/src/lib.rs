//! agent-registry-server: HTTP host for the RustChain agent registry
//!
//! This crate provides:
//! - `POST /api/register` for proof-of-possession registration
//! - `GET /health` liveness and verifier status
//! - Environment-driven configuration
//!
//! # Architecture
//!
//! The server is built on Axum with a middleware stack for:
//! - Request tracing and logging
//! - CORS handling
//! - Request ID generation
//! - Request timeout and a global concurrency ceiling
//! - JSON error responses
//!
//! All admission logic lives in `agent-registry-core`; this crate only
//! translates between HTTP and the core types.
//!
//! # Usage
//!
//! ```rust,ignore
//! use agent_registry_server::{app::build_app, config::ServerConfig, state::AppState};
//! use agent_registry_core::RegistrationValidator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::from_env()?;
//!     let state = AppState::new(RegistrationValidator::default(), config.clone());
//!     let app = build_app(state)?;
//!     let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

// Re-exports for convenience
pub use app::{apply_middleware, build_app};
pub use config::{ConfigError, LogFormat, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use state::AppState;

// Re-export dependent crates
pub use agent_registry_core;
