//! Chain configuration with TOML file support.

use crate::ChainError;
use cairn_types::ChainParams;
use cairn_utils::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a chain instance.
///
/// Can be loaded from a TOML file via [`ChainConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Log output format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Default log level when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Consensus parameters, the `[params]` table.
    #[serde(default)]
    pub params: ChainParams,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ChainConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ChainError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ChainError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ChainError> {
        toml::from_str(s).map_err(|e| ChainError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ChainError> {
        toml::to_string_pretty(self).map_err(|e| ChainError::Config(e.to_string()))
    }

    /// Install the global tracing subscriber described by this config.
    pub fn init_logging(&self) -> Result<(), ChainError> {
        cairn_utils::init_logging(self.log_format, &self.log_level)?;
        Ok(())
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            params: ChainParams::default(),
        }
    }
}
