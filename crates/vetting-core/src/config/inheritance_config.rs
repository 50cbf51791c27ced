//! Fallback resolver configuration.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Configuration for the inheritance subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct InheritanceConfig {
    /// Maximum locale steps in a single walk. Default: 64.
    pub max_chain_depth: Option<u32>,
    /// Maximum memoised resolutions. Default: 100_000.
    pub cache_capacity: Option<u64>,
    /// Memoise resolutions at all. Default: true.
    pub cache_enabled: Option<bool>,
}

impl InheritanceConfig {
    pub fn effective_max_chain_depth(&self) -> u32 {
        self.max_chain_depth
            .unwrap_or(defaults::DEFAULT_MAX_CHAIN_DEPTH)
    }

    pub fn effective_cache_capacity(&self) -> u64 {
        self.cache_capacity
            .unwrap_or(defaults::DEFAULT_CACHE_CAPACITY)
    }

    pub fn effective_cache_enabled(&self) -> bool {
        self.cache_enabled.unwrap_or(defaults::DEFAULT_CACHE_ENABLED)
    }
}
