//! Confidence tiers for decisions and per-organization agreement.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How confident a decision is. Ordered weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    Unconfirmed,
    Provisional,
    Contributed,
    Approved,
}

impl ConfidenceTier {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unconfirmed => "unconfirmed",
            Self::Provisional => "provisional",
            Self::Contributed => "contributed",
            Self::Approved => "approved",
        }
    }
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an organization's own vote agrees with the decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrganizationTier {
    /// The organization voted for the winner.
    Ok,
    /// The organization did not vote, and the winner is already approved.
    OkNovotes,
    ProvisionalOrWorse,
}

impl OrganizationTier {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::OkNovotes => "ok_novotes",
            Self::ProvisionalOrWorse => "provisional_or_worse",
        }
    }
}

impl fmt::Display for OrganizationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
