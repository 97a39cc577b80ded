//! Structured logging setup.
//!
//! Provides configurable logging with support for:
//! - JSON and pretty-print formats
//! - Stdout and file targets with rotation
//! - Credential masking on every target

mod config;
mod writer;

pub use config::{LogConfig, LogFormat, LogOutput, RotationConfig};
pub use writer::{MaskingMakeWriter, MaskingWriter};

use crate::masking::SensitiveDataMasker;
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer, fmt, fmt::MakeWriter, layer::SubscriberExt, registry::LookupSpan,
    util::SubscriberInitExt,
};

const LOG_FILE_PREFIX: &str = "voxdial.log";

/// Initialize the logging system with the given configuration.
///
/// Returns guards that must be kept alive for the duration of the program
/// so buffered file output is flushed.
///
/// # Example
///
/// ```no_run
/// use voxdial_telemetry::logging::{init_logging, LogConfig};
///
/// let config = LogConfig::default();
/// let _guards = init_logging(&config).expect("Failed to initialize logging");
/// ```
pub fn init_logging(config: &LogConfig) -> Result<Vec<WorkerGuard>, LoggingError> {
    let mut guards = Vec::new();
    let masker = Arc::new(SensitiveDataMasker::new());

    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| LoggingError::InvalidConfig(format!("level '{}': {e}", config.level)))?,
    };

    let mut layers: Vec<Box<dyn Layer<_> + Send + Sync>> = Vec::new();

    for output in &config.outputs {
        match output {
            LogOutput::Stdout => {
                let writer = MaskingMakeWriter::new(std::io::stdout, Arc::clone(&masker));
                layers.push(build_layer(config, config.format, writer));
            }
            LogOutput::File { path, rotation } => {
                std::fs::create_dir_all(path)?;
                let appender = match rotation.unwrap_or(RotationConfig::Daily) {
                    RotationConfig::Hourly => tracing_appender::rolling::hourly(path, LOG_FILE_PREFIX),
                    RotationConfig::Daily => tracing_appender::rolling::daily(path, LOG_FILE_PREFIX),
                    RotationConfig::Never => tracing_appender::rolling::never(path, LOG_FILE_PREFIX),
                };
                let (non_blocking, guard) = tracing_appender::non_blocking(appender);
                let writer = MaskingMakeWriter::new(non_blocking, Arc::clone(&masker));
                // Files are always JSON so they can be shipped as-is.
                layers.push(build_layer(config, LogFormat::Json, writer));
                guards.push(guard);
            }
        }
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;

    Ok(guards)
}

fn build_layer<S, W>(
    config: &LogConfig,
    format: LogFormat,
    writer: W,
) -> Box<dyn Layer<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let base = fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .with_thread_ids(config.include_thread_id)
        .with_file(config.include_file_info)
        .with_line_number(config.include_file_info);

    match format {
        LogFormat::Json => base.json().flatten_event(true).boxed(),
        LogFormat::Pretty => base.with_ansi(false).compact().boxed(),
    }
}

/// Errors that can occur during logging initialization.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// Failed to create log directory
    #[error("Failed to create log directory: {0}")]
    DirectoryCreation(#[from] std::io::Error),

    /// Invalid configuration
    #[error("Invalid logging configuration: {0}")]
    InvalidConfig(String),

    /// A global subscriber is already installed
    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_with_file_output() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("nested").join("logs");
        let config = LogConfig::stdout("info", LogFormat::Json)
            .with_file(log_dir.to_string_lossy().to_string());

        let guards = init_logging(&config).unwrap();
        assert_eq!(guards.len(), 1);
        assert!(log_dir.is_dir());

        tracing::info!(endpoint = "wss://x/ws?token=abcdefghijklmnop", "connecting");

        let second = init_logging(&LogConfig::default());
        assert!(matches!(second, Err(LoggingError::AlreadyInitialized(_))));
    }
}
