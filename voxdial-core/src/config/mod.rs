//! Configuration management module.
//!
//! This module provides the configuration system used by every voxdial
//! front end:
//! - YAML, TOML and JSON configuration files
//! - Validation with descriptive error messages
//! - `VOXDIAL_*` environment variable overrides
//!
//! # Example
//!
//! ```rust,ignore
//! use voxdial_core::config::{ConfigLoader, VoxdialConfig};
//!
//! let config: VoxdialConfig = ConfigLoader::new()
//!     .with_env_prefix("VOXDIAL")
//!     .load_validated("voxdial.yaml")?;
//! ```

mod loader;
mod traits;
pub mod validation;
mod voxdial_config;

pub use loader::{ConfigFormat, ConfigLoader};
pub use traits::{Configurable, Validatable};
pub use validation::{EnvOverride, ValidationContext, ValidationResult, Validator};
pub use voxdial_config::{ApiSettings, LoggingSettings, RealtimeSettings, VoxdialConfig};
