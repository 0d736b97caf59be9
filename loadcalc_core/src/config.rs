//! # Client Configuration
//!
//! Where the calculation service lives and how the client identifies itself.
//!
//! ```rust
//! use loadcalc_core::config::{ClientConfig, DEFAULT_ENDPOINT};
//!
//! let config = ClientConfig::from_json(r#"{"endpoint": "https://calc.example.com/api/calculate"}"#).unwrap();
//! assert!(config.user_agent.starts_with("loadcalc/"));
//! assert_ne!(config.endpoint, DEFAULT_ENDPOINT);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{LoadCalcError, LoadCalcResult};

/// Calculation endpoint of a locally running service
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/api/calculate";

/// Current crate version (from Cargo.toml)
pub const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_user_agent() -> String {
    format!("loadcalc/{}", CURRENT_VERSION)
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            endpoint: default_endpoint(),
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    /// Parse and validate a JSON config; missing fields take their defaults
    pub fn from_json(json: &str) -> LoadCalcResult<Self> {
        let config: ClientConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// The endpoint must be an absolute http(s) URL.
    pub fn validate(&self) -> LoadCalcResult<()> {
        let endpoint = self.endpoint.trim();
        if endpoint.is_empty() {
            return Err(LoadCalcError::config("endpoint", "Endpoint must not be empty"));
        }
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(LoadCalcError::config(
                "endpoint",
                format!("'{}' is not an http(s) URL", endpoint),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let err = ClientConfig::default().with_endpoint("ftp://host/calc").validate().unwrap_err();
        assert_eq!(err.error_code(), "CONFIG");

        let err = ClientConfig::from_json(r#"{"endpoint": "  "}"#).unwrap_err();
        assert_eq!(err.error_code(), "CONFIG");
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        let err = ClientConfig::from_json("{endpoint").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }
}
