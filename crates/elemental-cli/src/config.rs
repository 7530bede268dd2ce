//! CLI configuration file
//!
//! ```toml
//! [search]
//! max_concurrent_resolvers = 4
//! deadline_ms = 10000
//! tier_policy = "always"
//!
//! [log]
//! filter = "elemental_core=debug"
//! json = false
//! ```

use anyhow::Context;
use elemental_core::SearchConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter used when `ELEMENTAL_LOG` is unset
    pub filter: String,
    /// Emit JSON lines instead of text
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: false,
        }
    }
}

/// Whole configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Engine settings
    pub search: SearchConfig,
    /// Logging settings
    pub log: LogConfig,
}

impl CliConfig {
    /// Parse TOML text
    ///
    /// # Errors
    /// Fails on malformed TOML or an invalid search section.
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(text).context("malformed configuration")?;
        config.search.validate().context("invalid [search] section")?;
        Ok(config)
    }

    /// Load a TOML file, or defaults when `path` is `None`
    ///
    /// # Errors
    /// Fails if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("loading config {}", path.display()))
    }
}
