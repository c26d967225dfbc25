use serde::{Deserialize, Serialize};
use std::path::Path;

use super::engine::EngineConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::upstream::UpstreamConfig;
use crate::query::AddressFamilyFilter;

const LOCAL_CONFIG: &str = "ferrous-lookup.toml";
const SYSTEM_CONFIG: &str = "/etc/ferrous-lookup/config.toml";

/// Main configuration structure for Ferrous Lookup
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Engine defaults applied to every submitted query
    #[serde(default)]
    pub engine: EngineConfig,

    /// Upstream servers used by the network resolution library
    #[serde(default)]
    pub upstream: UpstreamConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ferrous-lookup.toml in current directory
    /// 3. /etc/ferrous-lookup/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if Path::new(LOCAL_CONFIG).exists() {
            Self::from_file(LOCAL_CONFIG)?
        } else if Path::new(SYSTEM_CONFIG).exists() {
            Self::from_file(SYSTEM_CONFIG)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if !overrides.servers.is_empty() {
            self.upstream.servers = overrides.servers;
        }
        if let Some(timeout) = overrides.timeout_ms {
            self.upstream.timeout_ms = timeout;
        }
        if overrides.security_only {
            self.engine.security_only = true;
        }
        if let Some(family) = overrides.address_family {
            self.engine.address_family = family;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        self.upstream.validate()?;
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Validation(
                "logging level cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub log_level: Option<String>,
    pub servers: Vec<String>,
    pub timeout_ms: Option<u64>,
    pub security_only: bool,
    pub address_family: Option<AddressFamilyFilter>,
}
