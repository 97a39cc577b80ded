//! # Voxdial CLI
//!
//! Command-line front end for the voxdial calling platform.
//!
//! This CLI provides commands for:
//! - Listening to the realtime notification channel
//! - Checking backend health and signing in
//! - Browsing call history and campaigns

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use voxdial_core::config::{ConfigLoader, LoggingSettings, VoxdialConfig};
use voxdial_telemetry::logging::{LogConfig, LogFormat, init_logging};

use commands::{calls, campaigns, health, listen, login};

const ENV_PREFIX: &str = "VOXDIAL";

/// Voxdial - client for the AI calling platform
#[derive(Parser)]
#[command(name = "voxdial")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (yaml, toml or json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Access token for authenticated requests
    #[arg(long, global = true, env = "VOXDIAL_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Stream realtime notifications until Ctrl-C
    Listen(listen::ListenArgs),

    /// Check backend health
    Health,

    /// Sign in and print the access token
    Login(login::LoginArgs),

    /// Show call history
    Calls(calls::CallsArgs),

    /// Show campaigns and their status counts
    Campaigns(campaigns::CampaignsArgs),

    /// Show version and configured endpoints
    Info,
}

/// Loads the config file when given, otherwise the defaults. Environment
/// overrides and validation apply in both cases.
fn load_config(path: Option<&PathBuf>) -> Result<VoxdialConfig> {
    let loader = ConfigLoader::new().with_env_prefix(ENV_PREFIX);
    let config = match path {
        Some(path) => loader
            .load_validated(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => loader
            .finish(VoxdialConfig::default())
            .context("Invalid configuration")?,
    };
    Ok(config)
}

fn log_config(settings: &LoggingSettings, verbose: bool) -> Result<LogConfig> {
    let level = if verbose { "debug" } else { settings.level.as_str() };
    let format: LogFormat = settings
        .format
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let config = LogConfig::stdout(level, format);
    Ok(match &settings.directory {
        Some(directory) => config.with_file(directory.clone()),
        None => config,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_ref())?;
    let _guards = init_logging(&log_config(&config.logging, cli.verbose)?)
        .context("Failed to initialize logging")?;

    match cli.command {
        Commands::Listen(args) => listen::run(&config, cli.token, args).await?,
        Commands::Health => health::run(&config).await?,
        Commands::Login(args) => login::run(&config, args).await?,
        Commands::Calls(args) => calls::run(&config, cli.token, args).await?,
        Commands::Campaigns(args) => campaigns::run(&config, cli.token, args).await?,
        Commands::Info => print_info(&config),
    }

    Ok(())
}

fn print_info(config: &VoxdialConfig) {
    println!("Voxdial Client");
    println!("==============");
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!("Rust Edition: 2024");
    println!();
    println!("Endpoints:");
    println!("  - REST API: {}", config.api.base_url);
    println!("  - Realtime: {}", config.realtime.endpoint);
    println!();
    println!("Realtime channel:");
    println!(
        "  - Reconnect interval: {} ms",
        config.realtime.reconnect_interval_ms
    );
    println!(
        "  - Max reconnect attempts: {}",
        config.realtime.max_reconnect_attempts
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_listen_overrides() {
        let cli = Cli::try_parse_from([
            "voxdial",
            "--verbose",
            "listen",
            "--endpoint",
            "wss://calls.test/ws",
            "--interval-ms",
            "250",
            "--max-attempts",
            "2",
        ])
        .unwrap();

        assert!(cli.verbose);
        let Commands::Listen(args) = cli.command else {
            panic!("expected listen");
        };
        assert_eq!(args.endpoint.as_deref(), Some("wss://calls.test/ws"));
        assert_eq!(args.interval_ms, Some(250));
        assert_eq!(args.max_attempts, Some(2));
    }

    #[test]
    fn test_global_token_after_subcommand() {
        let cli = Cli::try_parse_from(["voxdial", "calls", "--token", "abc", "--limit", "5"]).unwrap();
        assert_eq!(cli.token.as_deref(), Some("abc"));
        let Commands::Calls(args) = cli.command else {
            panic!("expected calls");
        };
        assert_eq!(args.limit, Some(5));
    }

    #[test]
    fn test_login_requires_credentials() {
        assert!(Cli::try_parse_from(["voxdial", "login", "--username", "ada"]).is_err());
    }

    #[test]
    fn test_invalid_status_rejected() {
        assert!(Cli::try_parse_from(["voxdial", "calls", "--status", "ringing"]).is_err());
        assert!(Cli::try_parse_from(["voxdial", "campaigns", "--status", "running"]).is_ok());
    }

    #[test]
    fn test_load_config_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "api:\n  base_url: \"http://localhost:9000\"\nrealtime:\n  endpoint: \"ws://localhost:9000/ws\"\n"
        )
        .unwrap();

        let config = load_config(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(config.realtime.endpoint, "ws://localhost:9000/ws");
    }

    #[test]
    fn test_load_config_missing_file() {
        let missing = PathBuf::from("/nonexistent/voxdial.yaml");
        let err = load_config(Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/voxdial.yaml"));
    }

    #[test]
    fn test_log_config_mapping() {
        let settings = LoggingSettings {
            level: "warn".to_string(),
            format: "json".to_string(),
            directory: Some("/tmp/voxdial-logs".to_string()),
        };

        let config = log_config(&settings, false).unwrap();
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.outputs.len(), 2);

        let verbose = log_config(&LoggingSettings::default(), true).unwrap();
        assert_eq!(verbose.level, "debug");
        assert_eq!(verbose.outputs.len(), 1);
    }
}
