//! Ballots: everything needed to decide one field in one locale.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use vetting_core::errors::{BallotDefect, BallotError};
use vetting_core::{
    ConfidenceTier, FieldPath, LocaleId, Organization, TrustLevel, Value, VettingResult, VoterId,
};
use vetting_inheritance::FallbackResolver;

/// One voter's proposal as supplied by the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub voter: VoterId,
    pub level: TrustLevel,
    pub organization: Organization,
    pub value: Value,
    /// Replaces the level's default weight when present, larger or smaller.
    #[serde(default)]
    pub weight_override: Option<i64>,
}

impl Proposal {
    pub fn new(
        voter: u32,
        level: TrustLevel,
        organization: Organization,
        value: impl Into<Value>,
    ) -> Self {
        Self {
            voter: VoterId(voter),
            level,
            organization,
            value: value.into(),
            weight_override: None,
        }
    }

    pub fn with_weight(mut self, weight: i64) -> Self {
        self.weight_override = Some(weight);
        self
    }
}

/// A validated vote with its effective weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub organization: Organization,
    pub level: TrustLevel,
    pub value: Value,
    pub weight: u32,
}

/// The value currently on record and how confident it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Baseline {
    pub value: Value,
    pub tier: ConfidenceTier,
}

impl Baseline {
    pub fn new(value: impl Into<Value>, tier: ConfidenceTier) -> Self {
        Self {
            value: value.into(),
            tier,
        }
    }
}

/// Immutable input to a decision. Only constructible through validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ballot {
    locale: LocaleId,
    path: FieldPath,
    baseline: Option<Baseline>,
    fallback: Option<String>,
    votes: BTreeMap<VoterId, Vote>,
}

impl Ballot {
    /// Validate proposals into a ballot.
    ///
    /// Rejects non-positive or out-of-range weights and duplicate voter ids.
    pub fn build(
        locale: LocaleId,
        path: FieldPath,
        baseline: Option<Baseline>,
        fallback: Option<String>,
        proposals: impl IntoIterator<Item = Proposal>,
    ) -> Result<Self, BallotError> {
        let mut builder = Self::builder().locale(locale).path(path);
        builder.baseline = baseline;
        builder.fallback = fallback;
        builder.proposals.extend(proposals);
        builder.build()
    }

    pub fn builder() -> BallotBuilder {
        BallotBuilder::default()
    }

    pub fn locale(&self) -> &LocaleId {
        &self.locale
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    pub fn baseline(&self) -> Option<&Baseline> {
        self.baseline.as_ref()
    }

    /// Literal fallback (bailey) value, if one exists.
    pub fn fallback(&self) -> Option<&str> {
        self.fallback.as_deref()
    }

    pub fn votes(&self) -> &BTreeMap<VoterId, Vote> {
        &self.votes
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }
}

/// Incremental ballot construction; `build` validates.
#[derive(Debug, Clone, Default)]
pub struct BallotBuilder {
    locale: Option<LocaleId>,
    path: Option<FieldPath>,
    baseline: Option<Baseline>,
    fallback: Option<String>,
    proposals: Vec<Proposal>,
}

impl BallotBuilder {
    pub fn locale(mut self, locale: LocaleId) -> Self {
        self.locale = Some(locale);
        self
    }

    pub fn path(mut self, path: FieldPath) -> Self {
        self.path = Some(path);
        self
    }

    pub fn baseline(mut self, value: impl Into<Value>, tier: ConfidenceTier) -> Self {
        self.baseline = Some(Baseline::new(value, tier));
        self
    }

    pub fn fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    pub fn proposal(mut self, proposal: Proposal) -> Self {
        self.proposals.push(proposal);
        self
    }

    /// Shorthand for a proposal at the level's default weight.
    pub fn vote(
        self,
        voter: u32,
        level: TrustLevel,
        organization: Organization,
        value: impl Into<Value>,
    ) -> Self {
        self.proposal(Proposal::new(voter, level, organization, value))
    }

    /// Fill the fallback from the resolver's bailey value for the ballot's
    /// locale and path. Needs both to be set first.
    pub fn fallback_from(mut self, resolver: &FallbackResolver) -> VettingResult<Self> {
        let (Some(locale), Some(path)) = (&self.locale, &self.path) else {
            return Err(BallotError::InvalidBallot(if self.locale.is_none() {
                BallotDefect::MissingLocale
            } else {
                BallotDefect::MissingPath
            })
            .into());
        };
        self.fallback = resolver
            .bailey_value(locale, path)?
            .map(|value| value.as_str().to_string());
        Ok(self)
    }

    pub fn build(self) -> Result<Ballot, BallotError> {
        let invalid = BallotError::InvalidBallot;
        let locale = self.locale.ok_or(invalid(BallotDefect::MissingLocale))?;
        let path = self.path.ok_or(invalid(BallotDefect::MissingPath))?;

        let mut votes = BTreeMap::new();
        for proposal in self.proposals {
            let voter = proposal.voter;
            let weight = match proposal.weight_override {
                None => proposal.level.default_weight(),
                Some(w) if w <= 0 => {
                    return Err(invalid(BallotDefect::NonPositiveWeight { voter, weight: w }))
                }
                Some(w) => u32::try_from(w)
                    .map_err(|_| invalid(BallotDefect::WeightOverflow { voter, weight: w }))?,
            };
            let vote = Vote {
                organization: proposal.organization,
                level: proposal.level,
                value: proposal.value,
                weight,
            };
            if votes.insert(voter, vote).is_some() {
                return Err(invalid(BallotDefect::DuplicateVoter { voter }));
            }
        }

        Ok(Ballot {
            locale,
            path,
            baseline: self.baseline,
            fallback: self.fallback,
            votes,
        })
    }
}
