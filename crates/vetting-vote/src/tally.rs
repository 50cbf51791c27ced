//! Organization-weighted vote tallies with fallback pooling.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use vetting_core::{Organization, Value};

use crate::ballot::Ballot;

/// A competitor after pooling: one distinct value, or the fallback pool
/// reported under one of its two spellings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Reported spelling.
    pub value: Value,
    /// Pooled total.
    pub total: u64,
    /// True when this candidate is the fallback pool.
    pub pooled: bool,
}

/// Per-organization contributions and per-value totals for one ballot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally {
    contributions: BTreeMap<Organization, BTreeMap<Value, u32>>,
    totals: BTreeMap<Value, u64>,
    conflicted: BTreeSet<Organization>,
    fallback: Option<Value>,
}

/// Aggregate a ballot.
///
/// Each organization contributes to a value the maximum weight of any one of
/// its members proposing it, never the sum. An organization whose members
/// proposed two or more distinct values is conflicted; the literal fallback
/// and the marker count as distinct here.
pub fn tally(ballot: &Ballot) -> Tally {
    let mut contributions: BTreeMap<Organization, BTreeMap<Value, u32>> = BTreeMap::new();
    for vote in ballot.votes().values() {
        let slot = contributions
            .entry(vote.organization)
            .or_default()
            .entry(vote.value.clone())
            .or_insert(0);
        *slot = (*slot).max(vote.weight);
    }

    let mut totals: BTreeMap<Value, u64> = BTreeMap::new();
    let mut conflicted = BTreeSet::new();
    for (org, values) in &contributions {
        if values.len() > 1 {
            conflicted.insert(*org);
        }
        for (value, weight) in values {
            *totals.entry(value.clone()).or_insert(0) += u64::from(*weight);
        }
    }

    let fallback = ballot
        .fallback()
        .map(|f| Value::Text(f.to_string()))
        .filter(|f| !f.is_inheritance_marker());

    debug!(
        locale = %ballot.locale(),
        votes = ballot.votes().len(),
        organizations = contributions.len(),
        conflicted = conflicted.len(),
        "tallied ballot"
    );

    Tally {
        contributions,
        totals,
        conflicted,
        fallback,
    }
}

impl Tally {
    /// Unpooled totals, one entry per distinct proposed value.
    pub fn totals_by_value(&self) -> &BTreeMap<Value, u64> {
        &self.totals
    }

    pub fn total(&self, value: &Value) -> u64 {
        self.totals.get(value).copied().unwrap_or(0)
    }

    pub fn conflicted_organizations(&self) -> &BTreeSet<Organization> {
        &self.conflicted
    }

    /// Value -> contribution for one organization; `None` if it did not vote.
    pub fn contributions(&self, org: Organization) -> Option<&BTreeMap<Value, u32>> {
        self.contributions.get(&org)
    }

    pub fn voting_organizations(&self) -> impl Iterator<Item = Organization> + '_ {
        self.contributions.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// The literal fallback as a value, when the ballot has one.
    pub fn fallback(&self) -> Option<&Value> {
        self.fallback.as_ref()
    }

    /// True when `value` is the literal fallback or the marker.
    pub fn in_pool(&self, value: &Value) -> bool {
        self.fallback.is_some()
            && (value.is_inheritance_marker() || Some(value) == self.fallback.as_ref())
    }

    /// Equality with the literal fallback and the marker treated as one.
    pub fn pool_equivalent(&self, a: &Value, b: &Value) -> bool {
        a == b || (self.in_pool(a) && self.in_pool(b))
    }

    /// Pooled competitors, unordered.
    ///
    /// With a fallback, its literal and the marker compete as one candidate
    /// whose total is their sum, reported as the marker unless the literal's
    /// own total is strictly higher.
    pub fn candidates(&self) -> Vec<Candidate> {
        let mut candidates: Vec<Candidate> = self
            .totals
            .iter()
            .filter(|(value, _)| !self.in_pool(value))
            .map(|(value, total)| Candidate {
                value: value.clone(),
                total: *total,
                pooled: false,
            })
            .collect();

        if let Some(pool) = self.pooled_candidate() {
            candidates.push(pool);
        }
        candidates
    }

    /// The fallback pool, if any member of it received votes.
    pub fn pooled_candidate(&self) -> Option<Candidate> {
        let literal = self.fallback.as_ref()?;
        let literal_total = self.total(literal);
        let marker_total = self.total(&Value::InheritanceMarker);
        if literal_total == 0 && marker_total == 0 {
            return None;
        }
        let value = if literal_total > marker_total {
            literal.clone()
        } else {
            Value::InheritanceMarker
        };
        Some(Candidate {
            value,
            total: literal_total + marker_total,
            pooled: true,
        })
    }

    /// Best total any single value could reach: every organization's
    /// strongest contribution, summed.
    pub fn best_possible_total(&self) -> u64 {
        self.contributions
            .values()
            .filter_map(|values| values.values().max())
            .map(|w| u64::from(*w))
            .sum()
    }
}
