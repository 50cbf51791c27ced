//! Logging configuration.

use serde::{Deserialize, Serialize};

use super::defaults;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LogConfig {
    /// Fallback `EnvFilter` directives when `VETTING_LOG` is unset.
    pub filter: Option<String>,
}

impl LogConfig {
    pub fn effective_filter(&self) -> &str {
        self.filter.as_deref().unwrap_or(defaults::DEFAULT_LOG_FILTER)
    }
}
