//! Logging setup
//!
//! Logs go to stderr so that `inspect` output on stdout stays clean for
//! piping. The filter comes from the resolved `logging.level`, which already
//! folds in `--log-level`, `FRAMECUT_LOG` and the config file.

use std::io;

use tracing_subscriber::EnvFilter;

use crate::domain::errors::DomainError;
use crate::ports::{LogFormat, LoggingSettings};

/// Build the filter from a level or directive string
pub fn build_filter(directives: &str) -> Result<EnvFilter, DomainError> {
    EnvFilter::try_new(directives)
        .map_err(|e| DomainError::Config(format!("Invalid log filter '{}': {}", directives, e)))
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(settings: &LoggingSettings) -> Result<(), DomainError> {
    let filter = build_filter(&settings.level)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false);

    let result = match settings.format {
        LogFormat::Json => builder.json().with_current_span(false).try_init(),
        LogFormat::Pretty => builder.compact().try_init(),
    };

    result.map_err(|e| DomainError::Config(format!("Failed to initialise logging: {}", e)))
}
