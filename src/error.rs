//! Error types for restql.
//!
//! Compilation itself never fails: problems found while compiling a
//! configuration are reported as [`ValidationError`] values alongside the
//! partial output. [`RestqlError`] only covers the crate edges (decoding a
//! configuration, loading settings, file IO).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The main error type for restql operations.
#[derive(Debug, Error)]
pub enum RestqlError {
    /// The endpoint configuration could not be decoded.
    #[error("Invalid endpoint configuration: {0}")]
    Decode(#[from] serde_json::Error),

    /// The settings file could not be parsed.
    #[error("Invalid settings file {path}: {message}")]
    Settings { path: String, message: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RestqlError {
    /// Create a settings error for the given file.
    pub fn settings(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Settings {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for restql operations.
pub type RestqlResult<T> = Result<T, RestqlError>;

/// A recoverable problem found while compiling a configuration.
///
/// `field` is a path into the configuration, e.g. `joins[1].table`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// An identifier that failed the safe-identifier grammar.
    pub fn unsafe_identifier(field: impl Into<String>, value: &str) -> Self {
        Self::new(
            field,
            format!(
                "'{}' is not a safe identifier (expected letters, digits and underscores, not starting with a digit)",
                value
            ),
        )
    }

    /// A required value that is missing.
    pub fn required(field: impl Into<String>, what: &str) -> Self {
        Self::new(field, format!("{} is required", what))
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RestqlError::settings("restql.toml", "expected a table");
        assert_eq!(
            err.to_string(),
            "Invalid settings file restql.toml: expected a table"
        );
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::required("filters[0].secondValue", "second value");
        assert_eq!(err.to_string(), "filters[0].secondValue: second value is required");
    }

    #[test]
    fn test_validation_error_serializes_field_and_message() {
        let err = ValidationError::unsafe_identifier("primaryTable", "users; DROP TABLE x");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["field"], "primaryTable");
        assert!(json["message"].as_str().unwrap().contains("users; DROP TABLE x"));
    }
}
