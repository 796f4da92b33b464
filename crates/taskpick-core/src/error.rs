//! Core error types for taskpick-core.
//!
//! Selection and ordering never fail on well-formed input. The variants here
//! cover the inputs that would corrupt comparisons or table sizing, plus the
//! configuration layer.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for taskpick-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid argument (non-finite numbers, unknown sort keys, ...)
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The selection table would not fit in the configured limit or in memory
    #[error("Resource exhausted: selection table needs {cells} cells (limit: {limit})")]
    ResourceExhausted { cells: u128, limit: u64 },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Home directory could not be resolved
    #[error("Could not determine the configuration directory")]
    NoConfigDir,
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A numeric input was NaN or infinite
    #[error("Non-finite value for '{field}': {value}")]
    NonFinite { field: String, value: f64 },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl ValidationError {
    /// Check that `value` is finite, naming `field` in the error.
    pub fn require_finite(field: &str, value: f64) -> Result<f64, ValidationError> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ValidationError::NonFinite {
                field: field.to_string(),
                value,
            })
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_finite_passes_through_finite_values() {
        assert_eq!(ValidationError::require_finite("budget", 1.5).unwrap(), 1.5);
        assert_eq!(ValidationError::require_finite("budget", -3.0).unwrap(), -3.0);
    }

    #[test]
    fn require_finite_rejects_nan_and_infinity() {
        let err = ValidationError::require_finite("budget", f64::NAN).unwrap_err();
        assert!(matches!(err, ValidationError::NonFinite { ref field, .. } if field == "budget"));
        assert!(ValidationError::require_finite("time", f64::INFINITY).is_err());
        assert!(ValidationError::require_finite("time", f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn resource_exhausted_message_names_sizes() {
        let err = CoreError::ResourceExhausted { cells: 10, limit: 5 };
        assert_eq!(
            err.to_string(),
            "Resource exhausted: selection table needs 10 cells (limit: 5)"
        );
    }
}
