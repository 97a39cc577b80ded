//! Call history command.

use anyhow::{Context, Result};
use clap::Parser;
use voxdial_core::config::VoxdialConfig;
use voxdial_core::models::{CallHistoryFilters, CallStatus};

use super::{api_client, print_json};

/// Arguments for the calls command
#[derive(Parser)]
pub struct CallsArgs {
    /// Only calls of this campaign
    #[arg(long)]
    pub campaign: Option<String>,

    /// Only calls with this status (initiated, completed, failed)
    #[arg(long)]
    pub status: Option<CallStatus>,

    /// Only calls in this region
    #[arg(long)]
    pub region: Option<String>,

    /// Maximum number of rows
    #[arg(long)]
    pub limit: Option<u32>,
}

impl CallsArgs {
    fn filters(self) -> CallHistoryFilters {
        CallHistoryFilters {
            campaign_name: self.campaign,
            status: self.status,
            region: self.region,
            limit: self.limit,
        }
    }
}

/// Prints the matching call history as JSON.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn run(config: &VoxdialConfig, token: Option<String>, args: CallsArgs) -> Result<()> {
    let client = api_client(config, token)?;
    let records = client
        .call_history(&args.filters())
        .await
        .context("Failed to fetch call history")?;
    print_json(&records)
}
