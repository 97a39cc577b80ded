//! Sign-in command.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use voxdial_core::config::VoxdialConfig;
use voxdial_core::models::LoginCredentials;

use super::api_client;

/// Arguments for the login command
#[derive(Parser)]
pub struct LoginArgs {
    /// Account username or e-mail
    #[arg(short, long)]
    pub username: String,

    /// Account password
    #[arg(short, long, env = "VOXDIAL_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// Signs in and prints the access token on stdout.
///
/// # Errors
///
/// Returns an error if the credentials are blank or rejected.
pub async fn run(config: &VoxdialConfig, args: LoginArgs) -> Result<()> {
    let client = api_client(config, None)?;
    let credentials = LoginCredentials::new(&args.username, &args.password);

    let session = client.login(&credentials).await.context("Login failed")?;
    if let Some(user) = session.user() {
        info!(email = %user.email, role = ?user.role, "Signed in");
    }

    let token = session.token().context("Backend returned no access token")?;
    println!("{token}");
    Ok(())
}
