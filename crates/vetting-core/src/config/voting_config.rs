//! Vote resolution configuration.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Configuration for the voting subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VotingConfig {
    /// Attach a plain-English transcript to every decision. Default: false.
    pub transcript: Option<bool>,
    /// Approved bar for the static threshold policy. Default: 8.
    pub default_approved_bar: Option<u32>,
    /// Whether the static policy treats every locale as established. Default: false.
    pub established_by_default: Option<bool>,
    /// Locales the static policy treats as established regardless of the default.
    #[serde(default)]
    pub established_locales: Vec<String>,
}

impl VotingConfig {
    pub fn effective_transcript(&self) -> bool {
        self.transcript.unwrap_or(defaults::DEFAULT_TRANSCRIPT)
    }

    pub fn effective_approved_bar(&self) -> u32 {
        self.default_approved_bar
            .unwrap_or(defaults::DEFAULT_APPROVED_BAR)
    }

    pub fn effective_established_by_default(&self) -> bool {
        self.established_by_default
            .unwrap_or(defaults::DEFAULT_ESTABLISHED)
    }
}
