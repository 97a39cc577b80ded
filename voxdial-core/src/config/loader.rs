//! Configuration loader supporting YAML, TOML and JSON.

use super::traits::{Configurable, Validatable};
use crate::error::ConfigError;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigFormat {
    /// YAML format (.yaml, .yml)
    #[default]
    Yaml,
    /// TOML format (.toml)
    Toml,
    /// JSON format (.json)
    Json,
}

impl ConfigFormat {
    /// Detects the format from a file extension.
    ///
    /// Returns `None` if the extension is not recognized.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "yaml" | "yml" => Some(Self::Yaml),
                "toml" => Some(Self::Toml),
                "json" => Some(Self::Json),
                _ => None,
            })
    }

    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Toml => "toml",
            Self::Json => "json",
        }
    }
}

/// Configuration loader with format detection and environment overrides.
///
/// # Example
///
/// ```rust
/// use voxdial_core::config::{ConfigFormat, ConfigLoader, VoxdialConfig};
///
/// let yaml = "realtime:\n  max_reconnect_attempts: 2\n";
/// let config: VoxdialConfig = ConfigLoader::new()
///     .load_str(yaml, ConfigFormat::Yaml)
///     .unwrap();
/// assert_eq!(config.realtime.max_reconnect_attempts, 2);
/// assert_eq!(config.realtime.reconnect_interval_ms, 3000);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    env_prefix: Option<String>,
    validate: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    #[must_use]
    pub fn new() -> Self {
        Self {
            env_prefix: None,
            validate: true,
        }
    }

    /// Sets the environment variable prefix used by [`Self::load_validated`].
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Sets whether [`Self::load_validated`] validates after loading.
    ///
    /// Default is `true`.
    #[must_use]
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Returns the environment variable prefix, if set.
    #[must_use]
    pub fn env_prefix(&self) -> Option<&str> {
        self.env_prefix.as_deref()
    }

    /// Loads configuration from a file, detecting the format from its extension.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file format is not recognized
    /// - The file cannot be read
    /// - The content cannot be parsed
    pub fn load_file<T, P>(&self, path: P) -> Result<T, ConfigError>
    where
        T: DeserializeOwned,
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path).ok_or_else(|| unrecognized_extension(path))?;

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        self.load_str(&content, format).map_err(|e| match e {
            ConfigError::InvalidFormat { reason, .. } => ConfigError::InvalidFormat {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })
    }

    /// Loads a file, then applies environment overrides (when a prefix is
    /// set) and validation (unless disabled).
    ///
    /// # Errors
    ///
    /// Returns the load error, or the first validation failure.
    pub fn load_validated<T, P>(&self, path: P) -> Result<T, ConfigError>
    where
        T: DeserializeOwned + Configurable + Validatable,
        P: AsRef<Path>,
    {
        let config = self.load_file(path)?;
        self.finish(config)
    }

    /// Applies environment overrides and validation to an already built
    /// configuration. Used when no file is given.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure.
    pub fn finish<T>(&self, mut config: T) -> Result<T, ConfigError>
    where
        T: Configurable + Validatable,
    {
        if let Some(prefix) = &self.env_prefix {
            config.apply_env_overrides(prefix);
        }
        if self.validate {
            config.validate()?;
        }
        Ok(config)
    }

    /// Loads configuration from a string with the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if the content cannot be parsed.
    pub fn load_str<T>(&self, content: &str, format: ConfigFormat) -> Result<T, ConfigError>
    where
        T: DeserializeOwned,
    {
        match format {
            ConfigFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|e| format_error("<string>", "YAML parse", e))
            }
            ConfigFormat::Toml => {
                toml::from_str(content).map_err(|e| format_error("<string>", "TOML parse", e))
            }
            ConfigFormat::Json => {
                serde_json::from_str(content).map_err(|e| format_error("<string>", "JSON parse", e))
            }
        }
    }

    /// Serializes a configuration to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn serialize<T>(config: &T, format: ConfigFormat) -> Result<String, ConfigError>
    where
        T: serde::Serialize,
    {
        match format {
            ConfigFormat::Yaml => serde_yaml::to_string(config)
                .map_err(|e| format_error("<serialize>", "YAML serialization", e)),
            ConfigFormat::Toml => toml::to_string_pretty(config)
                .map_err(|e| format_error("<serialize>", "TOML serialization", e)),
            ConfigFormat::Json => serde_json::to_string_pretty(config)
                .map_err(|e| format_error("<serialize>", "JSON serialization", e)),
        }
    }

    /// Saves a configuration to a file, detecting the format from its extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the format is not recognized, serialization
    /// fails, or the file cannot be written.
    pub fn save_file<T, P>(config: &T, path: P) -> Result<(), ConfigError>
    where
        T: serde::Serialize,
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path).ok_or_else(|| unrecognized_extension(path))?;

        let content = Self::serialize(config, format)?;

        std::fs::write(path, content).map_err(|e| ConfigError::FileWriteError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

#[allow(clippy::needless_pass_by_value)]
fn format_error(path: &str, stage: &str, e: impl std::fmt::Display) -> ConfigError {
    ConfigError::InvalidFormat {
        path: path.to_string(),
        reason: format!("{stage} error: {e}"),
    }
}

fn unrecognized_extension(path: &Path) -> ConfigError {
    ConfigError::InvalidFormat {
        path: path.display().to_string(),
        reason: "Unrecognized file extension. Supported: .yaml, .yml, .toml, .json".to_string(),
    }
}
