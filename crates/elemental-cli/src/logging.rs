//! Tracing subscriber setup

use crate::config::LogConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable overriding the configured filter
pub const LOG_ENV: &str = "ELEMENTAL_LOG";

/// Install the global subscriber, logging to stderr
///
/// # Errors
/// Fails if the filter does not parse or a subscriber is already installed.
pub fn init(config: &LogConfig) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.filter)?,
    };

    let registry = tracing_subscriber::registry().with(filter);
    if config.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()?;
    }
    Ok(())
}
