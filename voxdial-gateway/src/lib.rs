//! # Voxdial Gateway
//!
//! Network communication with the calling platform backend.
//!
//! This crate provides:
//! - A reconnecting WebSocket notification channel
//! - A REST client for the backend API
//!
//! # Architecture
//!
//! - `ws` - realtime notification channel
//! - `rest` - REST client and session
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use voxdial_core::config::RealtimeSettings;
//! use voxdial_gateway::ws::{ChannelBuilder, Handlers};
//!
//! # async fn run() -> Result<(), voxdial_core::error::ConfigError> {
//! let channel = ChannelBuilder::from_settings(&RealtimeSettings::default())
//!     .token("eyJ...")
//!     .open(Arc::new(Handlers::new().with_message(|e| println!("{}", e.kind))))?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]

/// Realtime notification channel
pub mod ws;

/// REST client
pub mod rest;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::rest::{ApiClient, Session};
    pub use crate::ws::{
        ChannelBuilder, ChannelHandle, ChannelHandler, ConnectionState, Handlers,
        InboundEnvelope, RetryPolicy,
    };
}
