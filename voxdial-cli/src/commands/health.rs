//! Backend health command.

use anyhow::{Result, bail};
use voxdial_core::config::VoxdialConfig;

use super::{api_client, print_json};

/// Prints the health report. Fails when the backend is unhealthy.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the backend is
/// unreachable.
pub async fn run(config: &VoxdialConfig) -> Result<()> {
    let client = api_client(config, None)?;
    let report = client.health_check().await;
    print_json(&report)?;

    if !report.is_healthy() {
        bail!("{}", report.message);
    }
    Ok(())
}
