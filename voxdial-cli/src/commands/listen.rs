//! Realtime notification listener.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::sync::Arc;
use tokio::sync::Notify;
use tracing::{info, warn};
use voxdial_core::config::{RealtimeSettings, VoxdialConfig};
use voxdial_gateway::ws::{ChannelBuilder, Handlers};

use super::ConsoleNotifier;

/// Arguments for the listen command
#[derive(Parser)]
pub struct ListenArgs {
    /// WebSocket endpoint (defaults to the configured one)
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// Delay between reconnect attempts in milliseconds
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Reconnect attempts before giving up
    #[arg(long)]
    pub max_attempts: Option<u32>,
}

impl ListenArgs {
    fn apply(&self, settings: &mut RealtimeSettings) {
        if let Some(endpoint) = &self.endpoint {
            settings.endpoint.clone_from(endpoint);
        }
        if let Some(interval_ms) = self.interval_ms {
            settings.reconnect_interval_ms = interval_ms;
        }
        if let Some(max_attempts) = self.max_attempts {
            settings.max_reconnect_attempts = max_attempts;
        }
    }
}

/// Prints every envelope as one JSON line until Ctrl-C or until the
/// channel gives up reconnecting.
///
/// # Errors
///
/// Returns an error for an invalid endpoint or after retries run out.
pub async fn run(config: &VoxdialConfig, token: Option<String>, args: ListenArgs) -> Result<()> {
    let mut settings = config.realtime.clone();
    args.apply(&mut settings);

    let exhausted = Arc::new(Notify::new());
    let handlers = {
        let exhausted = Arc::clone(&exhausted);
        Handlers::new()
            .with_message(|envelope| match serde_json::to_string(&envelope) {
                Ok(line) => println!("{line}"),
                Err(e) => warn!(error = %e, "Failed to render envelope"),
            })
            .with_connect(|| info!("Listening for notifications"))
            .with_reconnecting(|attempt, max| info!(attempt, max, "Reconnecting"))
            .with_retries_exhausted(move |_| exhausted.notify_one())
    };

    let channel = ChannelBuilder::from_settings(&settings)
        .maybe_token(token)
        .notifier(Arc::new(ConsoleNotifier))
        .open(Arc::new(handlers))
        .context("Failed to open notification channel")?;
    info!(endpoint = %channel.endpoint(), "Channel opened");

    tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for Ctrl-C")?;
            info!("Interrupted, closing channel");
            channel.close();
            Ok(())
        }
        () = exhausted.notified() => {
            channel.close();
            bail!("Connection lost after {} reconnect attempts", settings.max_reconnect_attempts);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_override_settings() {
        let mut settings = RealtimeSettings::default();
        let args = ListenArgs {
            endpoint: Some("ws://localhost:9000/ws".to_string()),
            interval_ms: None,
            max_attempts: Some(0),
        };
        args.apply(&mut settings);

        assert_eq!(settings.endpoint, "ws://localhost:9000/ws");
        assert_eq!(
            settings.reconnect_interval_ms,
            RealtimeSettings::default().reconnect_interval_ms
        );
        assert_eq!(settings.max_reconnect_attempts, 0);
    }

    #[tokio::test]
    async fn test_invalid_endpoint_fails_fast() {
        let config = VoxdialConfig::default();
        let args = ListenArgs {
            endpoint: Some("http://not-a-socket".to_string()),
            interval_ms: None,
            max_attempts: None,
        };
        assert!(run(&config, None, args).await.is_err());
    }
}
