//! REST client for the calling platform backend.
//!
//! One [`ApiClient`] holds the signed-in [`Session`] and covers:
//! - Health and the root welcome message
//! - Sign-in, token verification and refresh
//! - Call history and AI processing
//! - Campaigns, contacts and the knowledge base
//! - Analytics
//!
//! Rejected requests raise a user-facing notice through the client's
//! [`Notifier`](voxdial_core::notice::Notifier) before the error is
//! returned.
//!
//! # Example
//!
//! ```no_run
//! use voxdial_core::config::ApiSettings;
//! use voxdial_core::models::CallHistoryFilters;
//! use voxdial_gateway::rest::{ApiClient, Session};
//!
//! # async fn run() -> voxdial_core::error::Result<()> {
//! let client = ApiClient::new(ApiSettings::default())?
//!     .with_session(Session::with_token("eyJ..."));
//!
//! let report = client.health_check().await;
//! println!("{}: {}", report.status, report.message);
//!
//! let calls = client
//!     .call_history(&CallHistoryFilters {
//!         limit: Some(20),
//!         ..CallHistoryFilters::default()
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod analytics;
mod auth;
mod calls;
mod campaigns;
mod client;
mod contacts;
mod health;
mod knowledge;
mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use analytics::AnalyticsReport;
pub use auth::{is_token_expired, is_token_expired_at};
pub use calls::DEFAULT_HISTORY_LIMIT;
pub use client::{
    ACCESS_DENIED_TEXT, ApiClient, NETWORK_ERROR_TEXT, NOT_FOUND_TEXT, RequestBuilder,
    SERVER_ERROR_TEXT, SESSION_EXPIRED_TEXT, TIMEOUT_TEXT,
};
pub use health::{API_VERSION, BACKEND_NOT_CONNECTED, BACKEND_UNREACHABLE};
pub use knowledge::{DELETE_UNAVAILABLE_TEXT, DOCUMENT_DELETED_TEXT, KnowledgeDeletion};
pub use session::Session;
