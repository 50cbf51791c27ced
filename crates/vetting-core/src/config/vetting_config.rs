//! Top-level vetting configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{defaults, InheritanceConfig, LogConfig, VotingConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`VETTING_*`)
/// 2. Project config (`vetting.toml` in project root)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VettingConfig {
    pub inheritance: InheritanceConfig,
    pub voting: VotingConfig,
    pub log: LogConfig,
}

impl VettingConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join(defaults::CONFIG_FILE_NAME);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &VettingConfig) -> Result<(), ConfigError> {
        if config.inheritance.max_chain_depth == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "inheritance.max_chain_depth".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.inheritance.cache_capacity == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "inheritance.cache_capacity".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.voting.default_approved_bar == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "voting.default_approved_bar".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(ref filter) = config.log.filter {
            if filter.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "log.filter".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut VettingConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: VettingConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; only `Some` values in `other` override.
    fn merge(base: &mut VettingConfig, other: &VettingConfig) {
        // Inheritance
        if other.inheritance.max_chain_depth.is_some() {
            base.inheritance.max_chain_depth = other.inheritance.max_chain_depth;
        }
        if other.inheritance.cache_capacity.is_some() {
            base.inheritance.cache_capacity = other.inheritance.cache_capacity;
        }
        if other.inheritance.cache_enabled.is_some() {
            base.inheritance.cache_enabled = other.inheritance.cache_enabled;
        }

        // Voting
        if other.voting.transcript.is_some() {
            base.voting.transcript = other.voting.transcript;
        }
        if other.voting.default_approved_bar.is_some() {
            base.voting.default_approved_bar = other.voting.default_approved_bar;
        }
        if other.voting.established_by_default.is_some() {
            base.voting.established_by_default = other.voting.established_by_default;
        }
        if !other.voting.established_locales.is_empty() {
            base.voting.established_locales = other.voting.established_locales.clone();
        }

        // Log
        if other.log.filter.is_some() {
            base.log.filter = other.log.filter.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Unparseable values are ignored and the lower layer wins.
    fn apply_env_overrides(config: &mut VettingConfig) {
        if let Ok(val) = std::env::var("VETTING_MAX_CHAIN_DEPTH") {
            if let Ok(v) = val.parse::<u32>() {
                config.inheritance.max_chain_depth = Some(v);
            }
        }
        if let Ok(val) = std::env::var("VETTING_CACHE_CAPACITY") {
            if let Ok(v) = val.parse::<u64>() {
                config.inheritance.cache_capacity = Some(v);
            }
        }
        if let Ok(val) = std::env::var("VETTING_CACHE_ENABLED") {
            if let Ok(v) = val.parse::<bool>() {
                config.inheritance.cache_enabled = Some(v);
            }
        }
        if let Ok(val) = std::env::var("VETTING_TRANSCRIPT") {
            if let Ok(v) = val.parse::<bool>() {
                config.voting.transcript = Some(v);
            }
        }
        if let Ok(val) = std::env::var("VETTING_APPROVED_BAR") {
            if let Ok(v) = val.parse::<u32>() {
                config.voting.default_approved_bar = Some(v);
            }
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
