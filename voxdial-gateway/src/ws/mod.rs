//! Realtime notification channel.
//!
//! The backend pushes JSON envelopes (`campaign_update`, `call_update`,
//! `notification`, ...) over a WebSocket. A channel keeps that socket open:
//! - Token carried as a `token` query parameter
//! - Fixed-interval reconnection with an attempt ceiling
//! - Malformed frames logged and dropped
//! - Observable connection state
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use voxdial_gateway::ws::{self, Handlers, RetryPolicy};
//!
//! # async fn run() -> Result<(), voxdial_core::error::ConfigError> {
//! let handlers = Handlers::new()
//!     .with_message(|envelope| println!("{}: {}", envelope.kind, envelope.payload))
//!     .with_retries_exhausted(|attempts| eprintln!("gave up after {attempts} attempts"));
//!
//! let channel = ws::open(
//!     "wss://calls.example.com/ws",
//!     Some("eyJ...".to_string()),
//!     Arc::new(handlers),
//!     RetryPolicy::default(),
//! )?;
//! println!("state: {}", channel.state());
//! channel.close();
//! # Ok(())
//! # }
//! ```

mod channel;
mod config;
mod handler;
mod message;
mod state;
mod transport;

pub use channel::{CONNECTION_LOST_TEXT, ChannelHandle, open};
pub use config::{ChannelBuilder, RetryPolicy};
pub use handler::{ChannelHandler, Handlers};
pub use message::{
    CloseReason, DEFAULT_NOTIFICATION_TEXT, EnvelopeKind, InboundEnvelope, WebSocketMessage,
};
pub use state::ConnectionState;
pub use transport::{Connector, Transport, TungsteniteConnector};
