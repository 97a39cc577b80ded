//! Channel configuration.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use url::Url;
use voxdial_core::config::RealtimeSettings;
use voxdial_core::error::ConfigError;
use voxdial_core::notice::{Notifier, TracingNotifier};

use super::channel::{ChannelHandle, DriverContext};
use super::handler::ChannelHandler;
use super::transport::{Connector, TungsteniteConnector};

/// Reconnect bounds.
///
/// Retries happen at a fixed interval. There is no backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Delay between reconnect attempts in milliseconds. Must be positive.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Reconnect attempts before giving up. Zero disables reconnecting.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_interval_ms() -> u64 {
    3000
}

fn default_max_attempts() -> u32 {
    5
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl RetryPolicy {
    /// Creates a policy.
    #[must_use]
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval_ms: u64::try_from(interval.as_millis()).unwrap_or(u64::MAX),
            max_attempts,
        }
    }

    /// Reads the policy from realtime settings.
    #[must_use]
    pub fn from_settings(settings: &RealtimeSettings) -> Self {
        Self {
            interval_ms: settings.reconnect_interval_ms,
            max_attempts: settings.max_reconnect_attempts,
        }
    }

    /// Returns the retry interval as a Duration.
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Checks that the interval is positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_ms == 0 {
            return Err(ConfigError::invalid_value(
                "interval_ms",
                "Value 0 must be positive",
            ));
        }
        Ok(())
    }
}

/// Parses the endpoint and appends the credential as `token`.
pub(crate) fn build_endpoint_url(endpoint: &str, token: Option<&str>) -> Result<Url, ConfigError> {
    let mut url = Url::parse(endpoint)
        .map_err(|e| ConfigError::invalid_value("endpoint", format!("'{endpoint}': {e}")))?;

    if !matches!(url.scheme(), "ws" | "wss") {
        return Err(ConfigError::invalid_value(
            "endpoint",
            format!(
                "unsupported scheme '{}', must be a valid WebSocket URL (ws:// or wss://)",
                url.scheme()
            ),
        ));
    }

    if let Some(token) = token.filter(|t| !t.is_empty()) {
        url.query_pairs_mut().append_pair("token", token);
    }

    Ok(url)
}

/// Builder for a notification channel.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use voxdial_gateway::ws::{ChannelBuilder, Handlers, RetryPolicy};
///
/// # async fn run() -> Result<(), voxdial_core::error::ConfigError> {
/// let handle = ChannelBuilder::new("wss://calls.example.com/ws")
///     .token("eyJ...")
///     .retry_policy(RetryPolicy::default())
///     .open(Arc::new(Handlers::new().with_message(|e| println!("{}", e.kind))))?;
///
/// handle.send(&serde_json::json!({ "type": "subscribe" }));
/// handle.close();
/// # Ok(())
/// # }
/// ```
pub struct ChannelBuilder {
    endpoint: String,
    token: Option<String>,
    retry: RetryPolicy,
    connect_timeout: Duration,
    connector: Option<Arc<dyn Connector>>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl ChannelBuilder {
    /// Starts a builder for `endpoint` with default retry and timeout.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: None,
            retry: RetryPolicy::default(),
            connect_timeout: Duration::from_secs(10),
            connector: None,
            notifier: None,
        }
    }

    /// Starts a builder from realtime settings.
    #[must_use]
    pub fn from_settings(settings: &RealtimeSettings) -> Self {
        Self::new(settings.endpoint.clone())
            .retry_policy(RetryPolicy::from_settings(settings))
            .connect_timeout(settings.connect_timeout())
    }

    /// Sets the bearer credential. Read once, at `open()`.
    #[must_use]
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets or clears the bearer credential.
    #[must_use]
    pub fn maybe_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Sets the retry policy.
    #[must_use]
    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Sets the connect timeout of the default connector.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Replaces the transport connector.
    #[must_use]
    pub fn connector(mut self, connector: Arc<dyn Connector>) -> Self {
        self.connector = Some(connector);
        self
    }

    /// Sets where user-facing notices go. Defaults to [`TracingNotifier`].
    #[must_use]
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Validates the configuration and spawns the channel driver.
    ///
    /// Returns before any connection is attempted.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for a malformed or non-WebSocket endpoint or a
    /// zero retry interval. This is the only failure reported synchronously.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn open(self, handler: Arc<dyn ChannelHandler>) -> Result<ChannelHandle, ConfigError> {
        self.retry.validate()?;
        let url = build_endpoint_url(&self.endpoint, self.token.as_deref())?;

        let connector = self
            .connector
            .unwrap_or_else(|| Arc::new(TungsteniteConnector::new(self.connect_timeout)));
        let notifier = self
            .notifier
            .unwrap_or_else(|| Arc::new(TracingNotifier));

        Ok(ChannelHandle::spawn(DriverContext::new(
            url, self.retry, connector, handler, notifier,
        )))
    }
}

impl std::fmt::Debug for ChannelBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelBuilder")
            .field("endpoint", &self.endpoint)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("retry", &self.retry)
            .field("connect_timeout", &self.connect_timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_policy_defaults() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.interval(), Duration::from_secs(3));
        assert_eq!(policy.max_attempts, 5);
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn test_retry_policy_from_settings() {
        let settings = RealtimeSettings {
            reconnect_interval_ms: 250,
            max_reconnect_attempts: 0,
            ..RealtimeSettings::default()
        };
        let policy = RetryPolicy::from_settings(&settings);
        assert_eq!(policy, RetryPolicy::new(Duration::from_millis(250), 0));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let policy = RetryPolicy::new(Duration::ZERO, 3);
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_token_appended_as_query() {
        let url = build_endpoint_url("wss://x/ws", Some("tok123")).unwrap();
        assert_eq!(url.as_str(), "wss://x/ws?token=tok123");

        let url = build_endpoint_url("ws://x/ws?room=ops", Some("a b&c")).unwrap();
        assert_eq!(url.as_str(), "ws://x/ws?room=ops&token=a+b%26c");
    }

    #[test]
    fn test_missing_token_leaves_url_unchanged() {
        let url = build_endpoint_url("wss://x/ws", None).unwrap();
        assert_eq!(url.as_str(), "wss://x/ws");

        let url = build_endpoint_url("wss://x/ws", Some("")).unwrap();
        assert_eq!(url.as_str(), "wss://x/ws");
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let err = build_endpoint_url("https://x/ws", Some("tok")).unwrap_err();
        assert!(err.to_string().contains("ws://"));
        assert!(build_endpoint_url("not a url", None).is_err());
    }

    #[test]
    fn test_builder_debug_redacts_token() {
        let builder = ChannelBuilder::new("wss://x/ws").token("tok123");
        let rendered = format!("{builder:?}");
        assert!(!rendered.contains("tok123"));
    }
}
