//! Application state shared across handlers.

use std::sync::Arc;

use agent_registry_core::RegistrationValidator;

use crate::config::ServerConfig;

/// Application state shared across all handlers.
///
/// This is cloneable and can be extracted in handlers using `State<AppState>`.
/// The validator is stateless, so no locking is needed around it.
#[derive(Clone)]
pub struct AppState {
    /// Admission pipeline.
    validator: Arc<RegistrationValidator>,
    /// Server configuration.
    config: Arc<ServerConfig>,
}

impl AppState {
    /// Create new application state.
    pub fn new(validator: RegistrationValidator, config: ServerConfig) -> Self {
        Self {
            validator: Arc::new(validator),
            config: Arc::new(config),
        }
    }

    /// Get a reference to the admission pipeline.
    pub fn validator(&self) -> &RegistrationValidator {
        &self.validator
    }

    /// Get a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("verifier", self.validator.verifier())
            .finish()
    }
}
