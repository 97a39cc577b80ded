//! Channel connection state.

#![allow(clippy::redundant_pub_crate)]

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Observable state of a notification channel.
///
/// Driven only by channel lifecycle events and `close()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    /// A connection attempt is in flight.
    Connecting,
    /// The connection is open.
    Connected,
    /// No connection. Either waiting to retry, closed, or given up.
    #[default]
    Disconnected,
    /// The last connection attempt failed.
    Error,
}

impl ConnectionState {
    /// Returns true if the connection is open.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }

    /// Returns the lowercase wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the driver does after a connection ended or an attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RetryDecision {
    /// Wait and dial again. Carries the 1-based attempt number.
    Retry(u32),
    /// Retries used up. Carries the number of retries made.
    Exhausted(u32),
    /// The driver was superseded by `close()` or `reopen()`.
    Stale,
}

/// State shared between a channel handle and its driver task.
///
/// Every driver runs under a generation number. `close()` bumps the
/// generation, after which all transitions requested by the old driver
/// are refused.
#[derive(Debug, Default)]
pub(crate) struct InternalState {
    pub state: ConnectionState,
    pub retry_count: u32,
    pub generation: u64,
    pub closed: bool,
    /// Outbound queue of the current connection epoch.
    pub outbound: Option<mpsc::UnboundedSender<String>>,
}

impl InternalState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true while `generation` is the live, unclosed driver.
    pub fn is_current(&self, generation: u64) -> bool {
        !self.closed && self.generation == generation
    }

    /// Starts a driver generation. Returns the generation to run under.
    pub fn start(&mut self) -> u64 {
        self.closed = false;
        self.retry_count = 0;
        self.outbound = None;
        self.state = ConnectionState::Connecting;
        self.generation
    }

    pub fn mark_connecting(&mut self, generation: u64) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.state = ConnectionState::Connecting;
        true
    }

    /// Promotes to `connected` and opens a fresh outbound epoch.
    pub fn mark_connected(
        &mut self,
        generation: u64,
        outbound: mpsc::UnboundedSender<String>,
    ) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.state = ConnectionState::Connected;
        self.retry_count = 0;
        self.outbound = Some(outbound);
        true
    }

    pub fn mark_disconnected(&mut self, generation: u64) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.state = ConnectionState::Disconnected;
        self.outbound = None;
        true
    }

    pub fn mark_error(&mut self, generation: u64) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.state = ConnectionState::Error;
        self.outbound = None;
        true
    }

    /// Consumes a retry or declares the channel exhausted.
    pub fn schedule_retry(&mut self, generation: u64, max_attempts: u32) -> RetryDecision {
        if !self.is_current(generation) {
            return RetryDecision::Stale;
        }
        if self.retry_count < max_attempts {
            self.retry_count += 1;
            RetryDecision::Retry(self.retry_count)
        } else {
            self.state = ConnectionState::Disconnected;
            self.outbound = None;
            RetryDecision::Exhausted(self.retry_count)
        }
    }

    /// Makes the current driver inert. Returns false if already closed.
    pub fn close(&mut self) -> bool {
        if self.closed {
            return false;
        }
        self.closed = true;
        self.generation += 1;
        self.state = ConnectionState::Disconnected;
        self.outbound = None;
        true
    }
}
