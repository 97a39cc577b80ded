//! CLI subcommands.

pub mod calls;
pub mod campaigns;
pub mod health;
pub mod listen;
pub mod login;

use anyhow::{Context, Result};
use serde::Serialize;
use std::sync::Arc;
use voxdial_core::config::VoxdialConfig;
use voxdial_core::notice::{Notice, NoticeLevel, Notifier};
use voxdial_gateway::rest::{ApiClient, Session};

/// Prints notices to stderr so stdout stays machine-readable.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error | NoticeLevel::Warning => eprintln!("! {notice}"),
            NoticeLevel::Success | NoticeLevel::Info => eprintln!("* {notice}"),
        }
    }
}

/// Builds a REST client from the config, signed in with `token` if given.
pub fn api_client(config: &VoxdialConfig, token: Option<String>) -> Result<ApiClient> {
    let client = ApiClient::new(config.api.clone())
        .context("Failed to build HTTP client")?
        .with_notifier(Arc::new(ConsoleNotifier));
    Ok(match token {
        Some(token) => client.with_session(Session::with_token(token)),
        None => client,
    })
}

/// Writes `value` to stdout as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to render JSON")?;
    println!("{rendered}");
    Ok(())
}
