//! Checkout service configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ORDER_BACKEND_URL` - Base URL of the order backend (e.g., http://localhost:8000)
//!
//! ## Optional
//! - `ADDRESS_VALIDATOR_URL` - Remote address validation service; local rules only when unset
//! - `CHECKOUT_HOST` - Bind address (default: 127.0.0.1)
//! - `CHECKOUT_PORT` - Listen port (default: 8080)
//! - `BACKEND_TIMEOUT_SECS` - Per-request timeout for order backend calls (default: 10)
//! - `VALIDATOR_TIMEOUT_SECS` - Per-request timeout for address validator calls (default: 5)
//! - `CHECKOUT_ALLOWED_ORIGINS` - Comma-separated CORS allow-list (default: local dev frontends)

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use thiserror::Error;

const DEFAULT_ALLOWED_ORIGINS: &str =
    "http://localhost:3000,http://127.0.0.1:3000,http://localhost:5173,http://127.0.0.1:5173";

/// Configuration errors that can occur during loading.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Order backend base URL, without trailing slash
    pub backend_url: String,
    /// Address validator base URL, without trailing slash
    pub validator_url: Option<String>,
    pub backend_timeout: Duration,
    pub validator_timeout: Duration,
    /// Origins allowed by CORS
    pub allowed_origins: Vec<String>,
}

impl CheckoutConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(&lookup);

        let host = env
            .get_or_default("CHECKOUT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("CHECKOUT_HOST".to_string(), e.to_string()))?;

        let port = env
            .get_or_default("CHECKOUT_PORT", "8080")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("CHECKOUT_PORT".to_string(), e.to_string()))?;

        let backend_url = base_url("ORDER_BACKEND_URL", env.get_required("ORDER_BACKEND_URL")?)?;
        let validator_url = env
            .get_optional("ADDRESS_VALIDATOR_URL")
            .map(|url| base_url("ADDRESS_VALIDATOR_URL", url))
            .transpose()?;

        let backend_timeout = env.get_secs("BACKEND_TIMEOUT_SECS", 10)?;
        let validator_timeout = env.get_secs("VALIDATOR_TIMEOUT_SECS", 5)?;

        let allowed_origins = env
            .get_or_default("CHECKOUT_ALLOWED_ORIGINS", DEFAULT_ALLOWED_ORIGINS)
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            host,
            port,
            backend_url,
            validator_url,
            backend_timeout,
            validator_timeout,
            allowed_origins,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// The CORS allow-list used when `CHECKOUT_ALLOWED_ORIGINS` is unset.
pub fn default_allowed_origins() -> Vec<String> {
    DEFAULT_ALLOWED_ORIGINS.split(',').map(String::from).collect()
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Env<'_> {
    /// Get an optional variable; blank values count as unset.
    fn get_optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    fn get_required(&self, key: &str) -> Result<String, ConfigError> {
        self.get_optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    fn get_or_default(&self, key: &str, default: &str) -> String {
        self.get_optional(key)
            .unwrap_or_else(|| default.to_string())
    }

    fn get_secs(&self, key: &str, default: u64) -> Result<Duration, ConfigError> {
        let Some(value) = self.get_optional(key) else {
            return Ok(Duration::from_secs(default));
        };
        match value.trim().parse::<u64>() {
            Ok(0) => Err(ConfigError::InvalidEnvVar(
                key.to_string(),
                "must be greater than zero".to_string(),
            )),
            Ok(secs) => Ok(Duration::from_secs(secs)),
            Err(e) => Err(ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        }
    }
}

fn base_url(key: &str, value: String) -> Result<String, ConfigError> {
    let value = value.trim().trim_end_matches('/');
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must start with http:// or https://".to_string(),
        ));
    }
    Ok(value.to_string())
}
