//! Voters: trust levels, organizations and ids.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Voter identity as assigned by the account store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoterId(pub u32);

impl fmt::Display for VoterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for VoterId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Trust level of a voter, ordered from least to most trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrustLevel {
    Street,
    Vetter,
    Expert,
    Tc,
    Admin,
}

impl TrustLevel {
    pub const ALL: [TrustLevel; 5] = [
        Self::Street,
        Self::Vetter,
        Self::Expert,
        Self::Tc,
        Self::Admin,
    ];

    /// Default vote weight for this level.
    pub const fn default_weight(self) -> u32 {
        match self {
            Self::Street => 1,
            Self::Vetter => 4,
            Self::Expert => 8,
            Self::Tc => 20,
            Self::Admin => 100,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Street => "street",
            Self::Vetter => "vetter",
            Self::Expert => "expert",
            Self::Tc => "tc",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for TrustLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrustLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown trust level: {s}"))
    }
}

/// Organizations a voter can belong to. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Organization {
    Adlam,
    Apple,
    Bangladesh,
    Cldr,
    Google,
    Ibm,
    Kendra,
    Meta,
    Microsoft,
    Mozilla,
    Oracle,
    SurveyTool,
    Unaffiliated,
    Wikimedia,
}

impl Organization {
    pub const ALL: [Organization; 14] = [
        Self::Adlam,
        Self::Apple,
        Self::Bangladesh,
        Self::Cldr,
        Self::Google,
        Self::Ibm,
        Self::Kendra,
        Self::Meta,
        Self::Microsoft,
        Self::Mozilla,
        Self::Oracle,
        Self::SurveyTool,
        Self::Unaffiliated,
        Self::Wikimedia,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Adlam => "adlam",
            Self::Apple => "apple",
            Self::Bangladesh => "bangladesh",
            Self::Cldr => "cldr",
            Self::Google => "google",
            Self::Ibm => "ibm",
            Self::Kendra => "kendra",
            Self::Meta => "meta",
            Self::Microsoft => "microsoft",
            Self::Mozilla => "mozilla",
            Self::Oracle => "oracle",
            Self::SurveyTool => "survey_tool",
            Self::Unaffiliated => "unaffiliated",
            Self::Wikimedia => "wikimedia",
        }
    }
}

impl fmt::Display for Organization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Organization {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|org| org.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown organization: {s}"))
    }
}
