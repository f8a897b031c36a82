//! Migration configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SOURCE_BASE_URL` - Base URL of the source catalog API
//! - `TARGET_BASE_URL` - Base URL of the target import API
//! - `TARGET_API_TOKEN` - Bearer token for the target import API
//!
//! ## Optional
//! - `SOURCE_PAGE_SIZE` - Product listing page size (default: 50)
//! - `HTTP_TIMEOUT_SECS` - Per-request timeout in seconds (default: 30)

use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_PAGE_SIZE: u32 = 50;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Migration run configuration.
///
/// Implements `Debug` manually to redact the bearer token.
#[derive(Clone)]
pub struct MigrateConfig {
    /// Base URL of the source catalog API (always ends with `/`).
    pub source_base_url: Url,
    /// Base URL of the target import API (always ends with `/`).
    pub target_base_url: Url,
    /// Bearer token for the target import API.
    pub target_api_token: SecretString,
    /// Product listing page size.
    pub page_size: u32,
    /// Per-request timeout.
    pub http_timeout: Duration,
}

impl std::fmt::Debug for MigrateConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MigrateConfig")
            .field("source_base_url", &self.source_base_url.as_str())
            .field("target_base_url", &self.target_base_url.as_str())
            .field("target_api_token", &"[REDACTED]")
            .field("page_size", &self.page_size)
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

impl MigrateConfig {
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

        let source_base_url = get_base_url("SOURCE_BASE_URL")?;
        let target_base_url = get_base_url("TARGET_BASE_URL")?;
        let target_api_token = SecretString::from(get_required_env("TARGET_API_TOKEN")?);

        let page_size = get_env_or_default("SOURCE_PAGE_SIZE", DEFAULT_PAGE_SIZE.to_string())
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidEnvVar("SOURCE_PAGE_SIZE".to_string(), e.to_string()))?;
        if page_size == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "SOURCE_PAGE_SIZE".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        let timeout_secs = get_env_or_default("HTTP_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar("HTTP_TIMEOUT_SECS".to_string(), e.to_string()))?;

        Ok(Self {
            source_base_url,
            target_base_url,
            target_api_token,
            page_size,
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}

/// Get a required base URL, normalized to end with `/` so that `Url::join`
/// appends path segments instead of replacing them.
fn get_base_url(key: &str) -> Result<Url, ConfigError> {
    let mut raw = get_required_env(key)?;
    if !raw.ends_with('/') {
        raw.push('/');
    }
    Url::parse(&raw).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
