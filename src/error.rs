//! Error types for bucket-studio.
//!
//! The step generator itself is total and never fails. Everything around it
//! (configuration, export, input parsing, trace auditing) returns
//! `Result<T, StudioError>` instead of panicking.

use thiserror::Error;

use crate::sort::guard::GuardViolation;

/// Result type alias for bucket-studio operations.
pub type StudioResult<T> = Result<T, StudioError>;

/// Unified error type for all bucket-studio operations.
#[derive(Debug, Error)]
pub enum StudioError {
    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== Input Errors =====
    /// An input array could not be parsed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ===== Trace Errors =====
    /// A produced trace broke one of its invariants.
    #[error("Trace guard: {0}")]
    Guard(#[from] GuardViolation),

    /// Stored checksum does not match the trace contents.
    #[error("Trace checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch {
        /// Checksum recorded in the trace.
        expected: String,
        /// Checksum recomputed from the steps.
        actual: String,
    },

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StudioError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Create an invalid-input error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Check if this error came from auditing a trace.
    #[must_use]
    pub const fn is_trace_error(&self) -> bool {
        matches!(self, Self::Guard(_) | Self::ChecksumMismatch { .. })
    }
}

impl From<serde_json::Error> for StudioError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

impl From<bincode::Error> for StudioError {
    fn from(err: bincode::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_error_detection() {
        let guard = StudioError::Guard(GuardViolation::MissingInit);
        assert!(guard.is_trace_error());

        let checksum = StudioError::ChecksumMismatch {
            expected: "aa".to_string(),
            actual: "bb".to_string(),
        };
        assert!(checksum.is_trace_error());

        let config = StudioError::config("bad");
        assert!(!config.is_trace_error());
    }

    #[test]
    fn test_error_display() {
        let err = StudioError::config("bucket_count must be positive");
        assert_eq!(
            err.to_string(),
            "Configuration error: bucket_count must be positive"
        );

        let err = StudioError::invalid_input("'x' is not an integer");
        assert!(err.to_string().contains("'x' is not an integer"));
    }

    #[test]
    fn test_checksum_mismatch_display() {
        let err = StudioError::ChecksumMismatch {
            expected: "abc".to_string(),
            actual: "def".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("expected abc"));
        assert!(msg.contains("got def"));
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.yaml");
        let err: StudioError = io.into();
        assert!(matches!(err, StudioError::Io(_)));
    }

    #[test]
    fn test_from_yaml_error() {
        let yaml_err = serde_yaml::from_str::<Vec<i64>>("{{{{").unwrap_err();
        let err: StudioError = yaml_err.into();
        assert!(err.to_string().starts_with("YAML parsing error"));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<Vec<i64>>("[1,").unwrap_err();
        let err: StudioError = json_err.into();
        assert!(matches!(err, StudioError::Serialization(_)));
    }
}
