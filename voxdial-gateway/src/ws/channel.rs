//! Reconnecting notification channel.
//!
//! A channel owns one driver task. The driver dials, dispatches frames to
//! the [`ChannelHandler`], and after an unexpected closure or a failed
//! attempt waits a fixed interval and dials again, up to the policy's
//! attempt ceiling. `close()` cancels whatever the driver is waiting on.

#![allow(clippy::redundant_pub_crate)]

use futures::{SinkExt, StreamExt};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use url::Url;
use voxdial_core::error::ConfigError;
use voxdial_core::notice::{Notice, Notifier};
use voxdial_telemetry::masking::SensitiveDataMasker;

use super::config::{ChannelBuilder, RetryPolicy};
use super::handler::ChannelHandler;
use super::message::{InboundEnvelope, WebSocketMessage};
use super::state::{ConnectionState, InternalState, RetryDecision};
use super::transport::{Connector, Transport};

/// Notice published once retries are exhausted.
pub const CONNECTION_LOST_TEXT: &str = "Connection lost. Please refresh the page.";

const CLOSE_TIMEOUT: Duration = Duration::from_secs(1);

/// Everything a driver needs, shared across reopen.
pub(crate) struct DriverContext {
    url: Url,
    /// Endpoint with the token masked, for logs.
    endpoint: String,
    retry: RetryPolicy,
    connector: Arc<dyn Connector>,
    handler: Arc<dyn ChannelHandler>,
    notifier: Arc<dyn Notifier>,
}

enum ConnectionEnd {
    Shutdown,
    Lost(Option<String>),
}

impl DriverContext {
    pub(crate) fn new(
        url: Url,
        retry: RetryPolicy,
        connector: Arc<dyn Connector>,
        handler: Arc<dyn ChannelHandler>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let endpoint = SensitiveDataMasker::new().mask_url_token(url.as_str());
        Self {
            url,
            endpoint,
            retry,
            connector,
            handler,
            notifier,
        }
    }

    async fn drive(
        self: Arc<Self>,
        state: Arc<RwLock<InternalState>>,
        generation: u64,
        mut shutdown: watch::Receiver<bool>,
        previous: Option<JoinHandle<()>>,
    ) {
        // The superseded driver may still be closing its socket. Not raced
        // against shutdown so that chained reopens stay ordered.
        if let Some(previous) = previous {
            let _ = previous.await;
        }

        let live = || state.read().is_current(generation);

        loop {
            if !state.write().mark_connecting(generation) {
                return;
            }
            debug!(endpoint = %self.endpoint, "Connecting");

            let attempt = tokio::select! {
                biased;
                _ = shutdown.changed() => return,
                result = self.connector.connect(self.url.as_str()) => result,
            };

            match attempt {
                Ok(transport) => {
                    let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
                    if !state.write().mark_connected(generation, outbound_tx) {
                        return;
                    }
                    info!(endpoint = %self.endpoint, "Channel connected");
                    if live() {
                        self.handler.on_connect().await;
                    }

                    match self
                        .run_connection(transport, outbound_rx, &mut shutdown, &live)
                        .await
                    {
                        ConnectionEnd::Shutdown => return,
                        ConnectionEnd::Lost(reason) => {
                            if !state.write().mark_disconnected(generation) {
                                return;
                            }
                            warn!(
                                endpoint = %self.endpoint,
                                reason = reason.as_deref().unwrap_or("stream ended"),
                                "Channel disconnected"
                            );
                            self.handler.on_disconnect(reason).await;
                        }
                    }
                }
                Err(e) => {
                    if !state.write().mark_error(generation) {
                        return;
                    }
                    warn!(endpoint = %self.endpoint, error = %e, "Connection attempt failed");
                    self.handler.on_error(e).await;
                }
            }

            let decision = state
                .write()
                .schedule_retry(generation, self.retry.max_attempts);
            match decision {
                RetryDecision::Retry(attempt) => {
                    info!(
                        attempt,
                        max_attempts = self.retry.max_attempts,
                        delay_ms = self.retry.interval_ms,
                        "Reconnecting"
                    );
                    self.handler
                        .on_reconnecting(attempt, self.retry.max_attempts)
                        .await;

                    tokio::select! {
                        biased;
                        _ = shutdown.changed() => return,
                        () = tokio::time::sleep(self.retry.interval()) => {}
                    }
                }
                RetryDecision::Exhausted(attempts) => {
                    error!(
                        endpoint = %self.endpoint,
                        attempts,
                        "Max reconnection attempts reached"
                    );
                    self.handler.on_retries_exhausted(attempts).await;
                    if live() {
                        self.notifier
                            .notify(Notice::error(CONNECTION_LOST_TEXT).persistent());
                    }
                    return;
                }
                RetryDecision::Stale => return,
            }
        }
    }

    async fn run_connection(
        &self,
        transport: Transport,
        mut outbound: mpsc::UnboundedReceiver<String>,
        shutdown: &mut watch::Receiver<bool>,
        live: &impl Fn() -> bool,
    ) -> ConnectionEnd {
        let Transport {
            mut sink,
            mut stream,
        } = transport;

        loop {
            tokio::select! {
                biased;

                _ = shutdown.changed() => {
                    debug!("Shutdown signal received");
                    match tokio::time::timeout(CLOSE_TIMEOUT, sink.close()).await {
                        Ok(Ok(())) => {}
                        Ok(Err(e)) => debug!(error = %e, "Close handshake failed"),
                        Err(_) => debug!("Close handshake timed out"),
                    }
                    return ConnectionEnd::Shutdown;
                }

                frame = stream.next() => match frame {
                    Some(Ok(WebSocketMessage::Ping(payload))) => {
                        if let Err(e) = sink.send(WebSocketMessage::Pong(payload)).await {
                            warn!(error = %e, "Failed to send pong");
                        }
                    }
                    Some(Ok(WebSocketMessage::Pong(_))) => {}
                    Some(Ok(WebSocketMessage::Close(reason))) => {
                        let reason = reason
                            .map(|r| r.reason)
                            .filter(|r| !r.is_empty())
                            .unwrap_or_else(|| "Server closed connection".to_string());
                        return ConnectionEnd::Lost(Some(reason));
                    }
                    Some(Ok(frame)) => self.dispatch(&frame, live).await,
                    Some(Err(e)) => {
                        warn!(error = %e, "Transport error");
                        let reason = e.to_string();
                        if live() {
                            self.handler.on_error(e).await;
                        }
                        return ConnectionEnd::Lost(Some(reason));
                    }
                    None => return ConnectionEnd::Lost(None),
                },

                Some(text) = outbound.recv() => {
                    if let Err(e) = sink.send(WebSocketMessage::Text(text)).await {
                        warn!(error = %e, "Failed to send message");
                        if live() {
                            self.handler.on_error(e).await;
                        }
                    }
                }
            }
        }
    }

    async fn dispatch(&self, frame: &WebSocketMessage, live: &impl Fn() -> bool) {
        match InboundEnvelope::decode(frame) {
            Ok(envelope) => {
                debug!(kind = %envelope.kind, "Envelope received");
                let notice = envelope.notice();
                if live() {
                    self.handler.on_message(envelope).await;
                }
                if let Some(notice) = notice
                    && live()
                {
                    self.notifier.notify(notice);
                }
            }
            Err(e) => warn!(error = %e, "Dropping malformed frame"),
        }
    }
}

/// Handle to an open notification channel.
///
/// Dropping the handle closes the channel.
pub struct ChannelHandle {
    ctx: Arc<DriverContext>,
    state: Arc<RwLock<InternalState>>,
    shutdown: watch::Sender<bool>,
    driver: Option<JoinHandle<()>>,
}

impl ChannelHandle {
    pub(crate) fn spawn(ctx: DriverContext) -> Self {
        let ctx = Arc::new(ctx);
        let state = Arc::new(RwLock::new(InternalState::new()));
        let (shutdown, driver) = Self::start_driver(&ctx, &state, None);
        info!(endpoint = %ctx.endpoint, "Channel opened");
        Self {
            ctx,
            state,
            shutdown,
            driver: Some(driver),
        }
    }

    fn start_driver(
        ctx: &Arc<DriverContext>,
        state: &Arc<RwLock<InternalState>>,
        previous: Option<JoinHandle<()>>,
    ) -> (watch::Sender<bool>, JoinHandle<()>) {
        let generation = state.write().start();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let driver = tokio::spawn(Arc::clone(ctx).drive(
            Arc::clone(state),
            generation,
            shutdown_rx,
            previous,
        ));
        (shutdown_tx, driver)
    }

    /// Returns the current connection state.
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        self.state.read().state
    }

    /// Returns whether the channel is connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.state.read().state.is_connected()
    }

    /// Returns the number of reconnect attempts since the last successful
    /// connection.
    #[must_use]
    pub fn retry_count(&self) -> u32 {
        self.state.read().retry_count
    }

    /// Returns the endpoint with the credential masked.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.ctx.endpoint
    }

    /// Returns true once the driver has stopped, either after `close()` or
    /// after retries ran out.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.driver.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Sends `message` as JSON if the channel is connected.
    ///
    /// Otherwise logs a warning and drops the message. Nothing is queued
    /// for a later connection.
    pub fn send<T: Serialize + ?Sized>(&self, message: &T) {
        let outbound = {
            let state = self.state.read();
            if state.state.is_connected() {
                state.outbound.clone()
            } else {
                None
            }
        };

        let Some(outbound) = outbound else {
            warn!(state = %self.state(), "Channel is not connected, message dropped");
            return;
        };

        match serde_json::to_string(message) {
            Ok(text) => {
                if outbound.send(text).is_err() {
                    warn!("Connection ended before the message was queued");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize outbound message"),
        }
    }

    /// Stops the channel.
    ///
    /// Cancels a pending retry or connect attempt, releases the connection
    /// and leaves the state `disconnected`. Idempotent.
    pub fn close(&self) {
        if self.state.write().close() {
            info!(endpoint = %self.ctx.endpoint, "Channel closed");
        }
        self.shutdown.send_replace(true);
    }

    /// Closes the current driver and starts a fresh one with a zeroed retry
    /// counter.
    ///
    /// The new driver dials only after the old one has released its
    /// connection.
    pub fn reopen(&mut self) {
        self.close();
        let previous = self.driver.take();
        let (shutdown, driver) = Self::start_driver(&self.ctx, &self.state, previous);
        self.shutdown = shutdown;
        self.driver = Some(driver);
        info!(endpoint = %self.ctx.endpoint, "Channel reopened");
    }
}

impl Drop for ChannelHandle {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for ChannelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelHandle")
            .field("endpoint", &self.ctx.endpoint)
            .field("state", &self.state())
            .field("retry_count", &self.retry_count())
            .finish_non_exhaustive()
    }
}

/// Opens a channel to `endpoint` with the default connector and notifier.
///
/// Shorthand for [`ChannelBuilder`]. A `None` or empty credential connects
/// without the `token` query parameter.
pub fn open(
    endpoint: &str,
    credential: Option<String>,
    handler: Arc<dyn ChannelHandler>,
    retry: RetryPolicy,
) -> Result<ChannelHandle, ConfigError> {
    ChannelBuilder::new(endpoint)
        .maybe_token(credential)
        .retry_policy(retry)
        .open(handler)
}
