//! Server configuration from environment variables.

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

/// Default service name reported by `/health`.
pub const DEFAULT_SERVICE_NAME: &str = "rustchain-agent-registry";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("expected \"text\" or \"json\", got \"{other}\"")),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: IpAddr,
    /// Server port to listen on.
    pub port: u16,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Log output format.
    pub log_format: LogFormat,
    /// CORS allowed origins (comma-separated or "*" for all).
    pub cors_allowed_origins: String,
    /// Service name reported by the health check.
    pub service_name: String,
    /// Upper bound on the time spent handling a single request.
    pub request_timeout: Duration,
    /// Requests handled concurrently before new ones wait.
    pub max_concurrent_requests: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 5001,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            cors_allowed_origins: "*".to_string(),
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            request_timeout: Duration::from_secs(10),
            max_concurrent_requests: 256,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `HOST`: Bind address (default: 0.0.0.0)
    /// - `PORT`: Server port (default: 5001)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    /// - `LOG_FORMAT`: "text" or "json" (default: "text")
    /// - `CORS_ALLOWED_ORIGINS`: Allowed CORS origins (default: "*")
    /// - `SERVICE_NAME`: Name reported by `/health` (default: "rustchain-agent-registry")
    /// - `REQUEST_TIMEOUT_SECS`: Per-request timeout (default: 10)
    /// - `MAX_CONCURRENT_REQUESTS`: Concurrency ceiling (default: 256)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = parse_var(&lookup, "HOST")?.unwrap_or(defaults.host);
        let port = parse_var(&lookup, "PORT")?.unwrap_or(defaults.port);
        let log_level = lookup("LOG_LEVEL").unwrap_or(defaults.log_level);
        let log_format = parse_var(&lookup, "LOG_FORMAT")?.unwrap_or(defaults.log_format);
        let cors_allowed_origins =
            lookup("CORS_ALLOWED_ORIGINS").unwrap_or(defaults.cors_allowed_origins);
        let service_name = lookup("SERVICE_NAME").unwrap_or(defaults.service_name);

        let request_timeout = parse_var::<u64, _>(&lookup, "REQUEST_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);
        if request_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: "REQUEST_TIMEOUT_SECS".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        let max_concurrent_requests = parse_var(&lookup, "MAX_CONCURRENT_REQUESTS")?
            .unwrap_or(defaults.max_concurrent_requests);
        if max_concurrent_requests == 0 {
            return Err(ConfigError::InvalidValue {
                name: "MAX_CONCURRENT_REQUESTS".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            host,
            port,
            log_level,
            log_format,
            cors_allowed_origins,
            service_name,
            request_timeout,
            max_concurrent_requests,
        })
    }

    /// Get the socket address for the server.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Parse an optional variable, reporting unparsable values.
fn parse_var<T, F>(lookup: &F, name: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|raw| {
            raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
                name: name.to_string(),
                reason: e.to_string(),
            })
        })
        .transpose()
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Invalid environment variable value.
    #[error("invalid value for environment variable {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}
