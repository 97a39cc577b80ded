//! Configuration validation utilities.

use crate::error::ConfigError;

/// Result type for validation operations.
pub type ValidationResult = Result<(), ConfigError>;

/// Tracks the current path in the configuration tree and collects errors.
#[derive(Debug, Clone, Default)]
pub struct ValidationContext {
    path: Vec<String>,
    errors: Vec<ConfigError>,
}

impl ValidationContext {
    /// Creates a new validation context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters a new section in the configuration.
    pub fn enter(&mut self, section: impl Into<String>) {
        self.path.push(section.into());
    }

    /// Exits the current section.
    pub fn exit(&mut self) {
        self.path.pop();
    }

    /// Returns the current path as a dot-separated string.
    #[must_use]
    pub fn current_path(&self) -> String {
        self.path.join(".")
    }

    /// Adds a validation error.
    pub fn add_error(&mut self, error: ConfigError) {
        self.errors.push(error);
    }

    /// Returns true if there are no validation errors.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the collected validation errors.
    #[must_use]
    pub fn errors(&self) -> &[ConfigError] {
        &self.errors
    }

    /// Consumes the context and returns the first error, if any.
    ///
    /// # Errors
    ///
    /// Returns the first collected error.
    pub fn into_result(self) -> ValidationResult {
        self.errors.into_iter().next().map_or(Ok(()), Err)
    }

    /// Creates a missing field error with the current path context.
    #[must_use]
    pub fn missing_field(&self, field: impl Into<String>) -> ConfigError {
        let section = if self.path.is_empty() {
            None
        } else {
            Some(self.current_path())
        };
        ConfigError::MissingField {
            field: field.into(),
            section,
        }
    }

    /// Creates an invalid value error with the current path context.
    #[must_use]
    pub fn invalid_value(
        &self,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> ConfigError {
        let field_name = field.into();
        let full_field = if self.path.is_empty() {
            field_name
        } else {
            format!("{}.{}", self.current_path(), field_name)
        };
        ConfigError::InvalidValue {
            field: full_field,
            reason: reason.into(),
        }
    }
}

/// Fluent validator over a [`ValidationContext`].
#[derive(Debug)]
pub struct Validator<'a> {
    ctx: &'a mut ValidationContext,
}

impl<'a> Validator<'a> {
    /// Creates a new validator with the given context.
    pub fn new(ctx: &'a mut ValidationContext) -> Self {
        Self { ctx }
    }

    /// Validates that a string field is not empty.
    pub fn require_non_empty(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.ctx.add_error(self.ctx.missing_field(field));
        }
        self
    }

    /// Validates that a numeric value is within a range.
    pub fn in_range<T: PartialOrd + std::fmt::Display>(
        &mut self,
        field: &str,
        value: &T,
        min: &T,
        max: &T,
    ) -> &mut Self {
        if value < min || value > max {
            self.ctx.add_error(self.ctx.invalid_value(
                field,
                format!("Value {value} must be between {min} and {max}"),
            ));
        }
        self
    }

    /// Validates that a numeric value is positive.
    pub fn positive<T: PartialOrd + Default + std::fmt::Display>(
        &mut self,
        field: &str,
        value: &T,
    ) -> &mut Self {
        if *value <= T::default() {
            self.ctx.add_error(
                self.ctx
                    .invalid_value(field, format!("Value {value} must be positive")),
            );
        }
        self
    }

    /// Validates that a value is one of the allowed choices.
    pub fn one_of(&mut self, field: &str, value: &str, allowed: &[&str]) -> &mut Self {
        if !allowed.iter().any(|a| a.eq_ignore_ascii_case(value)) {
            self.ctx.add_error(self.ctx.invalid_value(
                field,
                format!("'{value}' must be one of: {}", allowed.join(", ")),
            ));
        }
        self
    }

    /// Validates an HTTP(S) URL.
    pub fn valid_http_url(&mut self, field: &str, value: &str) -> &mut Self {
        if !value.starts_with("http://") && !value.starts_with("https://") {
            self.ctx.add_error(
                self.ctx
                    .invalid_value(field, "Must be a valid URL (http:// or https://)"),
            );
        }
        self
    }

    /// Validates a WebSocket URL.
    pub fn valid_ws_url(&mut self, field: &str, value: &str) -> &mut Self {
        if !value.starts_with("ws://") && !value.starts_with("wss://") {
            self.ctx.add_error(
                self.ctx
                    .invalid_value(field, "Must be a valid WebSocket URL (ws:// or wss://)"),
            );
        }
        self
    }

    /// Returns the validation result.
    ///
    /// # Errors
    ///
    /// Returns the first collected error.
    pub fn result(&self) -> ValidationResult {
        match self.ctx.errors().first() {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

/// Environment variable helper for applying overrides.
///
/// # Example
///
/// ```rust
/// use voxdial_core::config::EnvOverride;
///
/// let mut level = "info".to_string();
/// EnvOverride::apply_string("VOXDIAL_DOC_UNSET_LEVEL", &mut level);
/// assert_eq!(level, "info");
/// ```
pub struct EnvOverride;

impl EnvOverride {
    /// Applies an environment variable override to a string value.
    pub fn apply_string(var_name: &str, target: &mut String) {
        if let Ok(value) = std::env::var(var_name) {
            *target = value;
        }
    }

    /// Applies an environment variable override to an optional string value.
    pub fn apply_optional_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(value) = std::env::var(var_name) {
            *target = Some(value);
        }
    }

    /// Applies an environment variable override to a numeric value.
    ///
    /// Unparseable values are ignored.
    pub fn apply_number<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(value) = std::env::var(var_name)
            && let Ok(parsed) = value.trim().parse()
        {
            *target = parsed;
        }
    }

    /// Applies an environment variable override to a boolean value.
    pub fn apply_bool(var_name: &str, target: &mut bool) {
        if let Ok(value) = std::env::var(var_name) {
            match value.to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => *target = true,
                "false" | "0" | "no" | "off" => *target = false,
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_context_path() {
        let mut ctx = ValidationContext::new();
        assert_eq!(ctx.current_path(), "");

        ctx.enter("realtime");
        assert_eq!(ctx.current_path(), "realtime");

        ctx.enter("retry");
        assert_eq!(ctx.current_path(), "realtime.retry");

        ctx.exit();
        ctx.exit();
        assert_eq!(ctx.current_path(), "");
    }

    #[test]
    fn test_invalid_value_carries_path() {
        let mut ctx = ValidationContext::new();
        ctx.enter("realtime");
        let err = ctx.invalid_value("endpoint", "bad");
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                field: "realtime.endpoint".to_string(),
                reason: "bad".to_string(),
            }
        );
    }

    #[test]
    fn test_validator_in_range_and_positive() {
        let mut ctx = ValidationContext::new();
        Validator::new(&mut ctx)
            .in_range("attempts", &5u32, &0, &100)
            .positive("interval", &3000u64);
        assert!(ctx.is_valid());

        let mut ctx = ValidationContext::new();
        Validator::new(&mut ctx).positive("interval", &0u64);
        assert!(!ctx.is_valid());
    }

    #[test]
    fn test_validator_urls() {
        let mut ctx = ValidationContext::new();
        Validator::new(&mut ctx)
            .valid_http_url("base_url", "https://api.example.com")
            .valid_ws_url("endpoint", "wss://api.example.com/ws");
        assert!(ctx.is_valid());

        let mut ctx = ValidationContext::new();
        Validator::new(&mut ctx)
            .valid_http_url("base_url", "ws://api.example.com")
            .valid_ws_url("endpoint", "https://api.example.com/ws");
        assert_eq!(ctx.errors().len(), 2);
    }

    #[test]
    fn test_validator_one_of() {
        let mut ctx = ValidationContext::new();
        Validator::new(&mut ctx).one_of("format", "JSON", &["json", "pretty"]);
        assert!(ctx.is_valid());

        let mut ctx = ValidationContext::new();
        let mut validator = Validator::new(&mut ctx);
        validator.one_of("format", "xml", &["json", "pretty"]);
        assert!(validator.result().unwrap_err().to_string().contains("xml"));
    }

    #[test]
    fn test_require_non_empty_rejects_whitespace() {
        let mut ctx = ValidationContext::new();
        Validator::new(&mut ctx).require_non_empty("level", "   ");
        assert!(!ctx.is_valid());
    }

    #[test]
    fn test_env_override_unset_keeps_value() {
        let mut flag = false;
        EnvOverride::apply_bool("VOXDIAL_TEST_UNSET_FLAG_93120", &mut flag);
        assert!(!flag);

        let mut attempts = 5u32;
        EnvOverride::apply_number("VOXDIAL_TEST_UNSET_NUMBER_93120", &mut attempts);
        assert_eq!(attempts, 5);
    }
}
