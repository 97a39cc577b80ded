//! Campaign listing command.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use voxdial_core::config::VoxdialConfig;
use voxdial_core::models::{Campaign, CampaignFilter, CampaignStatus, CampaignStatusCounts};

use super::{api_client, print_json};

/// Arguments for the campaigns command
#[derive(Parser)]
pub struct CampaignsArgs {
    /// Only campaigns with this status
    #[arg(long)]
    pub status: Option<CampaignStatus>,

    /// Case-insensitive text to look for in name, message or region
    #[arg(long)]
    pub search: Option<String>,
}

impl CampaignsArgs {
    fn filter(&self) -> CampaignFilter {
        CampaignFilter {
            status: self.status,
            search: self.search.clone(),
        }
    }
}

#[derive(Serialize)]
struct CampaignListing {
    campaigns: Vec<Campaign>,
    counts: CampaignStatusCounts,
}

/// Prints the filtered campaigns and the per-status counts of all of them.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn run(config: &VoxdialConfig, token: Option<String>, args: CampaignsArgs) -> Result<()> {
    let client = api_client(config, token)?;
    let all = client
        .campaigns()
        .await
        .context("Failed to fetch campaigns")?;

    let listing = CampaignListing {
        counts: CampaignStatusCounts::from_campaigns(&all),
        campaigns: args.filter().apply(all),
    };
    print_json(&listing)
}
