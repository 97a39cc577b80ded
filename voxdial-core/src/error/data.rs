//! Data-related error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Data error type covering payload parsing and local input validation.
///
/// # Examples
///
/// ```
/// use voxdial_core::error::DataError;
///
/// let error = DataError::ParseFailed {
///     field: "envelope".to_string(),
///     reason: "expected value at line 1 column 1".to_string(),
/// };
/// assert!(error.to_string().contains("envelope"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataError {
    /// Failed to parse data.
    #[error("[Data] Parse failed for field '{field}': {reason}")]
    ParseFailed {
        /// Field or structure that failed to parse.
        field: String,
        /// Reason for the parse failure.
        reason: String,
    },

    /// Input failed validation before it was sent anywhere.
    #[error("[Data] Validation failed: {field} - {reason}")]
    ValidationFailed {
        /// Field that failed validation.
        field: String,
        /// Reason for the validation failure.
        reason: String,
    },

    /// JSON serialization error.
    #[error("[Data] JSON error: {reason}")]
    JsonError {
        /// Reason for the JSON error.
        reason: String,
    },
}

impl DataError {
    /// Returns the severity level of this error.
    #[must_use]
    pub fn severity(&self) -> super::ErrorSeverity {
        super::ErrorSeverity::Warning
    }
}

impl From<serde_json::Error> for DataError {
    fn from(e: serde_json::Error) -> Self {
        Self::JsonError {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_serde_json() {
        let err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let data: DataError = err.into();
        assert!(matches!(data, DataError::JsonError { .. }));
    }

    #[test]
    fn test_validation_failed_display() {
        let error = DataError::ValidationFailed {
            field: "username".to_string(),
            reason: "Username and password are required".to_string(),
        };
        assert!(error.to_string().contains("Username and password are required"));
    }
}
