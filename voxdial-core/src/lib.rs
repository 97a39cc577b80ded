//! # Voxdial Core
//!
//! Shared building blocks for the voxdial client toolkit.
//!
//! This crate provides:
//! - Error types and handling framework
//! - Configuration management with YAML/TOML/JSON support and environment variable overrides
//! - Domain models for the calling platform backend
//! - User-facing notices

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]

/// Error types and handling
pub mod error;

/// Configuration management
pub mod config;

/// Backend domain models
pub mod models;

/// User-facing notices
pub mod notice;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::*;
    pub use crate::error::{ApiError, ConfigError, DataError, NetworkError, VoxdialError};
    pub use crate::models::*;
    pub use crate::notice::*;
}
