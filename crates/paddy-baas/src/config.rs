//! Document store configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults suitable for local development against a self-hosted backend.

use serde::{Deserialize, Serialize};
use std::env;

/// Hosted document store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaasConfig {
    /// Base URL of the hosted API, e.g. `https://backend.example.com/v1`
    pub endpoint: String,

    /// Project identifier, sent with every request
    pub project_id: String,

    /// Server API key (required in production)
    pub api_key: String,

    /// Database id the storefront collections live in
    pub database_id: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl BaasConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = BaasConfig {
            endpoint: env::var("BAAS_ENDPOINT")
                .unwrap_or_else(|_| "http://localhost:8080/v1".to_string()),

            project_id: env::var("BAAS_PROJECT_ID")
                .map_err(|_| ConfigError::MissingRequired("BAAS_PROJECT_ID".to_string()))?,

            api_key: env::var("BAAS_API_KEY")
                .map_err(|_| ConfigError::MissingRequired("BAAS_API_KEY".to_string()))?,

            database_id: env::var("BAAS_DATABASE_ID")
                .unwrap_or_else(|_| "storefront".to_string()),

            timeout_secs: env::var("BAAS_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("BAAS_TIMEOUT_SECS".to_string()))?,
        };

        if config.endpoint.trim().is_empty() {
            return Err(ConfigError::InvalidValue("BAAS_ENDPOINT".to_string()));
        }

        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
