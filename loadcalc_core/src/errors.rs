//! # Error Types
//!
//! Structured error types for loadcalc_core. Input parsing never produces an
//! error (malformed values default to zero), so every variant here belongs to
//! the submission path or to loading configuration and form snapshots.
//!
//! ## Example
//!
//! ```rust
//! use loadcalc_core::errors::{LoadCalcError, LoadCalcResult};
//!
//! fn require_endpoint(endpoint: &str) -> LoadCalcResult<()> {
//!     if endpoint.is_empty() {
//!         return Err(LoadCalcError::config("endpoint", "Endpoint must not be empty"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(require_endpoint("").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message shown when the service rejects a request without saying why.
pub const GENERIC_SERVICE_ERROR: &str = "An error occurred during calculation.";

/// Result type alias for loadcalc_core operations
pub type LoadCalcResult<T> = Result<T, LoadCalcError>;

/// Structured error type for the submission path.
///
/// Every variant's `Display` output is what ends up in the result region,
/// so `ServiceRejected` prints the service's message and nothing else.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum LoadCalcError {
    /// The calculation service answered with a non-success status
    #[error("{message}")]
    ServiceRejected { status: u16, message: String },

    /// The request never completed (connection refused, DNS, TLS, ...)
    #[error("Network error: {reason}")]
    Transport { reason: String },

    /// The service answered with a success status but an unreadable body
    #[error("Failed to parse response: {reason}")]
    Decode { reason: String },

    /// Client configuration is unusable
    #[error("Invalid configuration for '{field}': {reason}")]
    Config { field: String, reason: String },

    /// Reading a form snapshot or config file failed
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl LoadCalcError {
    /// Create a ServiceRejected error
    pub fn service_rejected(status: u16, message: impl Into<String>) -> Self {
        LoadCalcError::ServiceRejected {
            status,
            message: message.into(),
        }
    }

    /// Create a Transport error
    pub fn transport(reason: impl Into<String>) -> Self {
        LoadCalcError::Transport {
            reason: reason.into(),
        }
    }

    /// Create a Decode error
    pub fn decode(reason: impl Into<String>) -> Self {
        LoadCalcError::Decode {
            reason: reason.into(),
        }
    }

    /// Create a Config error
    pub fn config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        LoadCalcError::Config {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        LoadCalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether the failure came from the calculation round trip.
    ///
    /// Rejections and transport failures look the same to the user; both
    /// end in a rendered message.
    pub fn is_submission_failure(&self) -> bool {
        matches!(
            self,
            LoadCalcError::ServiceRejected { .. } | LoadCalcError::Transport { .. } | LoadCalcError::Decode { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            LoadCalcError::ServiceRejected { .. } => "SERVICE_REJECTED",
            LoadCalcError::Transport { .. } => "TRANSPORT",
            LoadCalcError::Decode { .. } => "DECODE",
            LoadCalcError::Config { .. } => "CONFIG",
            LoadCalcError::FileError { .. } => "FILE_ERROR",
            LoadCalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for LoadCalcError {
    fn from(e: serde_json::Error) -> Self {
        LoadCalcError::SerializationError { reason: e.to_string() }
    }
}
