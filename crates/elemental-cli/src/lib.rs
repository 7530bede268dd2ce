//! Elemental command-line front end
//!
//! Library half of the `elemental` binary: configuration, logging setup and
//! the subcommand implementations.

pub mod commands;
pub mod config;
pub mod logging;

pub use commands::SearchArgs;
pub use config::{CliConfig, LogConfig};
