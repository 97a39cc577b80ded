//! Error types and handling framework.
//!
//! Errors are grouped by concern and rolled up into [`VoxdialError`]:
//! - [`NetworkError`] - transport failures (connect, TLS, WebSocket, HTTP)
//! - [`ApiError`] - responses the backend rejected
//! - [`ConfigError`] - configuration loading and validation
//! - [`DataError`] - payload parsing and local input validation
//!
//! ```
//! use voxdial_core::error::{NetworkError, VoxdialError};
//!
//! let error: VoxdialError = NetworkError::Timeout { timeout_ms: 5000 }.into();
//! assert!(error.is_recoverable());
//! assert_eq!(error.category(), "network");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error severity levels for categorizing errors.
///
/// - `Fatal`: unrecoverable, the caller has to intervene
/// - `Recoverable`: can be retried
/// - `Warning`: non-critical, worth logging
/// - `Info`: expected condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ErrorSeverity {
    /// Unrecoverable error requiring caller action.
    Fatal,

    /// Error that can be retried.
    #[default]
    Recoverable,

    /// Non-critical issue.
    Warning,

    /// Informational condition.
    Info,
}

impl ErrorSeverity {
    /// Returns true if this error is recoverable (not fatal).
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Fatal)
    }

    /// Returns true if this error is fatal.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal)
    }

    /// Returns the severity as a static string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fatal => "FATAL",
            Self::Recoverable => "RECOVERABLE",
            Self::Warning => "WARNING",
            Self::Info => "INFO",
        }
    }
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

mod api;
mod config;
mod data;
mod network;

pub use api::ApiError;
pub use config::ConfigError;
pub use data::DataError;
pub use network::NetworkError;

/// Top-level error type for voxdial.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoxdialError {
    /// Network-related error.
    #[error("{0}")]
    Network(#[from] NetworkError),

    /// Backend API error.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Configuration error.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Data parsing or validation error.
    #[error("{0}")]
    Data(#[from] DataError),
}

impl VoxdialError {
    /// Returns the severity level of this error.
    #[must_use]
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Network(e) => e.severity(),
            Self::Api(e) => e.severity(),
            Self::Config(e) => e.severity(),
            Self::Data(e) => e.severity(),
        }
    }

    /// Returns true if this error is recoverable.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        self.severity().is_recoverable()
    }

    /// Returns the error category as a string.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Api(_) => "api",
            Self::Config(_) => "config",
            Self::Data(_) => "data",
        }
    }

    /// Returns the inner network error, if this is a network error.
    #[must_use]
    pub fn as_network_error(&self) -> Option<&NetworkError> {
        match self {
            Self::Network(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the inner API error, if this is an API error.
    #[must_use]
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }
}

/// A specialized Result type for voxdial operations.
pub type Result<T> = std::result::Result<T, VoxdialError>;
