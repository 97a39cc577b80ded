//! Top-level voxdial configuration.
//!
//! Credentials are not part of this configuration. The bearer token is
//! supplied per invocation.

use super::traits::{Configurable, Validatable};
use super::validation::{EnvOverride, ValidationContext, Validator};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main voxdial configuration.
///
/// # Example YAML
///
/// ```yaml
/// api:
///   base_url: "https://calls.example.com"
///   timeout_ms: 30000
///
/// realtime:
///   endpoint: "wss://calls.example.com/ws"
///   reconnect_interval_ms: 3000
///   max_reconnect_attempts: 5
///
/// logging:
///   level: info
///   format: pretty
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct VoxdialConfig {
    /// REST API settings.
    #[serde(default)]
    pub api: ApiSettings,

    /// Realtime notification channel settings.
    #[serde(default)]
    pub realtime: RealtimeSettings,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Validatable for VoxdialConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let mut ctx = ValidationContext::new();

        ctx.enter("api");
        self.api.validate_with_context(&mut ctx);
        ctx.exit();

        ctx.enter("realtime");
        self.realtime.validate_with_context(&mut ctx);
        ctx.exit();

        ctx.enter("logging");
        self.logging.validate_with_context(&mut ctx);
        ctx.exit();

        ctx.into_result()
    }
}

impl Configurable for VoxdialConfig {
    /// Applies overrides such as `VOXDIAL_API_BASE_URL` or
    /// `VOXDIAL_REALTIME_MAX_RECONNECT_ATTEMPTS`.
    fn apply_env_overrides(&mut self, prefix: &str) {
        self.api.apply_env_overrides(&format!("{prefix}_API"));
        self.realtime
            .apply_env_overrides(&format!("{prefix}_REALTIME"));
        self.logging.apply_env_overrides(&format!("{prefix}_LOGGING"));
    }

    fn env_var_names(prefix: &str) -> Vec<String> {
        let sections: [(&str, &[&str]); 3] = [
            ("API", &["BASE_URL", "TIMEOUT_MS", "USER_AGENT"]),
            (
                "REALTIME",
                &[
                    "ENDPOINT",
                    "RECONNECT_INTERVAL_MS",
                    "MAX_RECONNECT_ATTEMPTS",
                    "CONNECT_TIMEOUT_MS",
                ],
            ),
            ("LOGGING", &["LEVEL", "FORMAT", "DIRECTORY"]),
        ];
        sections
            .iter()
            .flat_map(|(section, fields)| {
                fields
                    .iter()
                    .map(move |field| format!("{prefix}_{section}_{field}"))
            })
            .collect()
    }
}

/// REST API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Backend base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in milliseconds.
    #[serde(default = "default_api_timeout_ms")]
    pub timeout_ms: u64,

    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8001".to_string()
}

fn default_api_timeout_ms() -> u64 {
    30_000
}

fn default_user_agent() -> String {
    format!("voxdial/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_api_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiSettings {
    /// Returns the request timeout as a Duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    fn validate_with_context(&self, ctx: &mut ValidationContext) {
        Validator::new(ctx)
            .valid_http_url("base_url", &self.base_url)
            .positive("timeout_ms", &self.timeout_ms)
            .require_non_empty("user_agent", &self.user_agent);
    }

    fn apply_env_overrides(&mut self, prefix: &str) {
        EnvOverride::apply_string(&format!("{prefix}_BASE_URL"), &mut self.base_url);
        EnvOverride::apply_number(&format!("{prefix}_TIMEOUT_MS"), &mut self.timeout_ms);
        EnvOverride::apply_string(&format!("{prefix}_USER_AGENT"), &mut self.user_agent);
    }
}

/// Realtime notification channel settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealtimeSettings {
    /// WebSocket endpoint (`ws://` or `wss://`).
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Fixed delay between reconnect attempts in milliseconds.
    #[serde(default = "default_reconnect_interval_ms")]
    pub reconnect_interval_ms: u64,

    /// Maximum reconnect attempts before giving up.
    #[serde(default = "default_max_reconnect_attempts")]
    pub max_reconnect_attempts: u32,

    /// Connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

fn default_endpoint() -> String {
    "ws://127.0.0.1:8001/ws".to_string()
}

fn default_reconnect_interval_ms() -> u64 {
    3000
}

fn default_max_reconnect_attempts() -> u32 {
    5
}

fn default_connect_timeout_ms() -> u64 {
    10_000
}

impl Default for RealtimeSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            reconnect_interval_ms: default_reconnect_interval_ms(),
            max_reconnect_attempts: default_max_reconnect_attempts(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

impl RealtimeSettings {
    /// Returns the reconnect interval as a Duration.
    #[must_use]
    pub fn reconnect_interval(&self) -> Duration {
        Duration::from_millis(self.reconnect_interval_ms)
    }

    /// Returns the connect timeout as a Duration.
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    fn validate_with_context(&self, ctx: &mut ValidationContext) {
        Validator::new(ctx)
            .valid_ws_url("endpoint", &self.endpoint)
            .positive("reconnect_interval_ms", &self.reconnect_interval_ms)
            .in_range(
                "max_reconnect_attempts",
                &self.max_reconnect_attempts,
                &0,
                &1000,
            )
            .positive("connect_timeout_ms", &self.connect_timeout_ms);
    }

    fn apply_env_overrides(&mut self, prefix: &str) {
        EnvOverride::apply_string(&format!("{prefix}_ENDPOINT"), &mut self.endpoint);
        EnvOverride::apply_number(
            &format!("{prefix}_RECONNECT_INTERVAL_MS"),
            &mut self.reconnect_interval_ms,
        );
        EnvOverride::apply_number(
            &format!("{prefix}_MAX_RECONNECT_ATTEMPTS"),
            &mut self.max_reconnect_attempts,
        );
        EnvOverride::apply_number(
            &format!("{prefix}_CONNECT_TIMEOUT_MS"),
            &mut self.connect_timeout_ms,
        );
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json, pretty).
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for daily-rotated log files. Stdout only when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            directory: None,
        }
    }
}

impl LoggingSettings {
    fn validate_with_context(&self, ctx: &mut ValidationContext) {
        Validator::new(ctx)
            .one_of(
                "level",
                &self.level,
                &["trace", "debug", "info", "warn", "error"],
            )
            .one_of("format", &self.format, &["json", "pretty"]);
    }

    fn apply_env_overrides(&mut self, prefix: &str) {
        EnvOverride::apply_string(&format!("{prefix}_LEVEL"), &mut self.level);
        EnvOverride::apply_string(&format!("{prefix}_FORMAT"), &mut self.format);
        EnvOverride::apply_optional_string(&format!("{prefix}_DIRECTORY"), &mut self.directory);
    }
}
