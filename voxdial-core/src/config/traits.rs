//! Configuration traits for validation and environment overrides.

use crate::error::ConfigError;

/// Trait for types that can be validated.
///
/// # Example
///
/// ```rust
/// use voxdial_core::config::Validatable;
/// use voxdial_core::error::ConfigError;
///
/// struct RetrySettings {
///     interval_ms: u64,
/// }
///
/// impl Validatable for RetrySettings {
///     fn validate(&self) -> Result<(), ConfigError> {
///         if self.interval_ms == 0 {
///             return Err(ConfigError::invalid_value("interval_ms", "must be positive"));
///         }
///         Ok(())
///     }
/// }
///
/// assert!(RetrySettings { interval_ms: 0 }.validate().is_err());
/// ```
pub trait Validatable {
    /// Validates the configuration.
    ///
    /// Returns `Ok(())` if the configuration is valid, or a `ConfigError`
    /// describing the first problem found.
    fn validate(&self) -> Result<(), ConfigError>;
}

/// Trait for types that support environment variable overrides.
pub trait Configurable: Sized {
    /// Applies environment variable overrides to the configuration.
    ///
    /// # Arguments
    ///
    /// * `prefix` - The environment variable prefix (e.g., "VOXDIAL")
    fn apply_env_overrides(&mut self, prefix: &str);

    /// Returns the environment variable names that can override this configuration.
    fn env_var_names(prefix: &str) -> Vec<String>;
}
