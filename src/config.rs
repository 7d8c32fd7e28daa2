//! Configuration for channels and routing
//!
//! Configuration is declarative data only: channel capacity and router
//! resolution behavior. Pipeline topology is always wired in code with
//! channel references, never resolved from config by name.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Top-level flow configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FlowConfig {
    #[serde(default)]
    pub channel: ChannelConfig,
    #[serde(default)]
    pub router: RouterConfig,
}

/// Channel construction defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ChannelConfig {
    /// Bounded capacity; `None` means unbounded
    pub capacity: Option<usize>,
}

/// Router behavior toggles
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RouterConfig {
    /// When true, an unmapped routing key is an error instead of a
    /// default-channel fallback
    #[serde(default)]
    pub resolution_required: bool,
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl FlowConfig {
    /// Load and validate configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: FlowConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.channel.validate()
    }
}

impl ChannelConfig {
    /// Validate channel settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == Some(0) {
            return Err(ConfigError::InvalidConfig(
                "channel capacity must be non-zero; omit it for an unbounded channel".to_string(),
            ));
        }
        Ok(())
    }
}
