//! Errors for responses the backend API rejected.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API error type covering non-success HTTP statuses and undecodable
/// response bodies.
///
/// # Examples
///
/// ```
/// use voxdial_core::error::ApiError;
///
/// let error = ApiError::from_status(404, "/v1/campaigns/db/7", "");
/// assert!(matches!(error, ApiError::NotFound { .. }));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiError {
    /// The session token is missing, invalid or expired (401).
    #[error("[Api] Unauthorized")]
    Unauthorized,

    /// The session lacks permission for the resource (403).
    #[error("[Api] Forbidden")]
    Forbidden,

    /// The resource does not exist (404).
    #[error("[Api] Not found: {path}")]
    NotFound {
        /// Request path.
        path: String,
    },

    /// The backend rejected the request payload (422).
    #[error("[Api] Validation Error: {message}")]
    Validation {
        /// Flattened validation details.
        message: String,
    },

    /// The backend failed to process the request (5xx).
    #[error("[Api] Server error: status {status_code} - {body}")]
    Server {
        /// HTTP status code.
        status_code: u16,
        /// Response body.
        body: String,
    },

    /// Any other non-success status.
    #[error("[Api] Request failed: status {status_code} - {body}")]
    Status {
        /// HTTP status code.
        status_code: u16,
        /// Response body.
        body: String,
    },

    /// The response body did not match the expected schema.
    #[error("[Api] Failed to decode response from {path}: {reason}")]
    Decode {
        /// Request path.
        path: String,
        /// Decoder message.
        reason: String,
    },
}

impl ApiError {
    /// Maps a non-success status to the matching variant.
    #[must_use]
    pub fn from_status(status_code: u16, path: &str, body: &str) -> Self {
        match status_code {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound {
                path: path.to_string(),
            },
            500..=599 => Self::Server {
                status_code,
                body: body.to_string(),
            },
            _ => Self::Status {
                status_code,
                body: body.to_string(),
            },
        }
    }

    /// Returns the HTTP status code this error corresponds to, if any.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Forbidden => Some(403),
            Self::NotFound { .. } => Some(404),
            Self::Validation { .. } => Some(422),
            Self::Server { status_code, .. } | Self::Status { status_code, .. } => {
                Some(*status_code)
            }
            Self::Decode { .. } => None,
        }
    }

    /// Returns the severity level of this error.
    #[must_use]
    pub fn severity(&self) -> super::ErrorSeverity {
        use super::ErrorSeverity;
        match self {
            Self::Unauthorized | Self::Forbidden => ErrorSeverity::Fatal,
            Self::Server { .. } => ErrorSeverity::Recoverable,
            Self::NotFound { .. } | Self::Validation { .. } | Self::Status { .. } => {
                ErrorSeverity::Warning
            }
            Self::Decode { .. } => ErrorSeverity::Fatal,
        }
    }
}
