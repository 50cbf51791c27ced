//! Outcome resolution: winner, confidence tier and per-organization report.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use vetting_core::constants::CONTRIBUTION_BAR;
use vetting_core::{ConfidenceTier, Organization, OrganizationTier, Value};

use crate::ballot::Ballot;
use crate::policy::{ThresholdPolicy, VoteThreshold};
use crate::tally::{Candidate, Tally};

/// The candidate that came second, after pooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerUp {
    pub value: Value,
    pub total: u64,
}

/// Result of deciding one ballot. Field names are stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// `None` only for an empty ballot with neither baseline nor fallback.
    pub winning_value: Option<Value>,
    pub winning_tier: ConfidenceTier,
    /// The winner's pooled total.
    pub pooled_total: u64,
    /// Unpooled totals per distinct proposed value.
    pub totals_by_value: BTreeMap<Value, u64>,
    pub conflicted_organizations: BTreeSet<Organization>,
    /// Every organization, voting or not.
    pub organization_tiers: BTreeMap<Organization, OrganizationTier>,
    pub next_best: Option<RunnerUp>,
    /// Candidates sharing the winner's pooled total, winner first.
    pub tied_values: Vec<Value>,
    pub approved_bar: u32,
    /// Below `contributed`, though the organizations that voted could have
    /// reached it by agreeing.
    pub disputed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<Vec<String>>,
}

impl Decision {
    pub fn tier_for_organization(&self, org: Organization) -> OrganizationTier {
        self.organization_tiers
            .get(&org)
            .copied()
            .unwrap_or(OrganizationTier::ProvisionalOrWorse)
    }
}

/// Tier reached by a pooled total under `threshold`.
pub fn tier_for_total(total: u64, threshold: VoteThreshold) -> ConfidenceTier {
    if total >= u64::from(threshold.approved_bar) {
        ConfidenceTier::Approved
    } else if threshold.established_locale && total >= u64::from(CONTRIBUTION_BAR) {
        ConfidenceTier::Contributed
    } else if total > 0 {
        ConfidenceTier::Provisional
    } else {
        ConfidenceTier::Unconfirmed
    }
}

/// Turns a ballot and its tally into a [`Decision`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OutcomeResolver {
    transcript: bool,
}

impl OutcomeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a plain-English explanation to every decision.
    pub fn with_transcript(mut self, enabled: bool) -> Self {
        self.transcript = enabled;
        self
    }

    pub fn resolve<P>(&self, ballot: &Ballot, tally: &Tally, policy: &P) -> Decision
    where
        P: ThresholdPolicy + ?Sized,
    {
        let threshold = policy.threshold(ballot.locale(), ballot.path());
        let mut log = Transcript::new(self.transcript);
        log.line(format!(
            "Ballot for {} in {}: {} votes, approved bar {}, {}.",
            ballot.path(),
            ballot.locale(),
            ballot.votes().len(),
            threshold.approved_bar,
            if threshold.established_locale {
                "established locale"
            } else {
                "locale not established"
            }
        ));

        if ballot.is_empty() {
            return self.resolve_empty(ballot, tally, threshold, log);
        }

        describe_contributions(&mut log, tally);

        let baseline = ballot.baseline().map(|b| &b.value);
        let matches_baseline = |candidate: &Candidate| {
            baseline.is_some_and(|base| tally.pool_equivalent(&candidate.value, base))
        };

        let mut candidates = tally.candidates();
        candidates.sort_by(|a, b| {
            Reverse(a.total)
                .cmp(&Reverse(b.total))
                .then_with(|| matches_baseline(b).cmp(&matches_baseline(a)))
                .then_with(|| a.value.cmp(&b.value))
        });

        // Non-empty ballots always have at least one candidate.
        let Some(winner) = candidates.first().cloned() else {
            return self.resolve_empty(ballot, tally, threshold, log);
        };

        let tied_values: Vec<Value> = candidates
            .iter()
            .take_while(|c| c.total == winner.total)
            .map(|c| c.value.clone())
            .collect();
        if tied_values.len() > 1 {
            let reason = if matches_baseline(&winner) {
                "it matches the baseline"
            } else {
                "it sorts first"
            };
            log.line(format!(
                "{} candidates tied at {}; \"{}\" wins because {}.",
                tied_values.len(),
                winner.total,
                winner.value,
                reason
            ));
        } else {
            log.line(format!("\"{}\" wins with {}.", winner.value, winner.total));
        }

        let next_best = candidates.get(1).map(|c| RunnerUp {
            value: c.value.clone(),
            total: c.total,
        });

        let winning_tier = tier_for_total(winner.total, threshold);
        log.line(explain_tier(winning_tier, winner.total, threshold));

        let best_possible = tally.best_possible_total();
        let disputed = winning_tier < ConfidenceTier::Contributed
            && tier_for_total(best_possible, threshold) >= ConfidenceTier::Contributed;
        if disputed {
            log.line(format!(
                "Disputed: agreement among the voting organizations could reach {best_possible}."
            ));
        }

        let organization_tiers = Organization::ALL
            .into_iter()
            .map(|org| (org, organization_tier(tally, org, &winner.value, winning_tier)))
            .collect();

        debug!(
            locale = %ballot.locale(),
            winner = %winner.value,
            total = winner.total,
            tier = %winning_tier,
            disputed,
            "decided ballot"
        );

        Decision {
            winning_value: Some(winner.value),
            winning_tier,
            pooled_total: winner.total,
            totals_by_value: tally.totals_by_value().clone(),
            conflicted_organizations: tally.conflicted_organizations().clone(),
            organization_tiers,
            next_best,
            tied_values,
            approved_bar: threshold.approved_bar,
            disputed,
            transcript: log.finish(),
        }
    }

    fn resolve_empty(
        &self,
        ballot: &Ballot,
        tally: &Tally,
        threshold: VoteThreshold,
        mut log: Transcript,
    ) -> Decision {
        let (winning_value, winning_tier) = match ballot.baseline() {
            Some(baseline) => {
                log.line(format!(
                    "No votes: keeping baseline \"{}\" at {}.",
                    baseline.value, baseline.tier
                ));
                (Some(baseline.value.clone()), baseline.tier)
            }
            None => {
                let fallback = ballot.fallback().map(Value::new);
                match &fallback {
                    Some(value) => log.line(format!("No votes and no baseline: using fallback \"{value}\".")),
                    None => log.line("No votes, no baseline and no fallback: no value.".to_string()),
                }
                (fallback, ConfidenceTier::Unconfirmed)
            }
        };

        let organization_tiers = Organization::ALL
            .into_iter()
            .map(|org| (org, no_vote_tier(winning_tier)))
            .collect();

        Decision {
            winning_value,
            winning_tier,
            pooled_total: 0,
            totals_by_value: BTreeMap::new(),
            conflicted_organizations: tally.conflicted_organizations().clone(),
            organization_tiers,
            next_best: None,
            tied_values: Vec::new(),
            approved_bar: threshold.approved_bar,
            disputed: false,
            transcript: log.finish(),
        }
    }
}

fn no_vote_tier(winning_tier: ConfidenceTier) -> OrganizationTier {
    if winning_tier == ConfidenceTier::Approved {
        OrganizationTier::OkNovotes
    } else {
        OrganizationTier::ProvisionalOrWorse
    }
}

/// `ok` when any of the organization's strongest values is the winner,
/// counting the fallback pool as one value.
fn organization_tier(
    tally: &Tally,
    org: Organization,
    winner: &Value,
    winning_tier: ConfidenceTier,
) -> OrganizationTier {
    let Some(values) = tally.contributions(org) else {
        return no_vote_tier(winning_tier);
    };
    let strongest = values.values().copied().max().unwrap_or(0);
    let agrees = values
        .iter()
        .filter(|(_, weight)| **weight == strongest)
        .any(|(value, _)| tally.pool_equivalent(value, winner));
    if agrees {
        OrganizationTier::Ok
    } else {
        OrganizationTier::ProvisionalOrWorse
    }
}

fn explain_tier(tier: ConfidenceTier, total: u64, threshold: VoteThreshold) -> String {
    match tier {
        ConfidenceTier::Approved => format!(
            "Tier approved: {total} reaches the approved bar {}.",
            threshold.approved_bar
        ),
        ConfidenceTier::Contributed => format!(
            "Tier contributed: established locale and {total} reaches the contribution bar {CONTRIBUTION_BAR}."
        ),
        ConfidenceTier::Provisional => format!(
            "Tier provisional: {total} is below the approved bar {}{}.",
            threshold.approved_bar,
            if threshold.established_locale {
                format!(" and the contribution bar {CONTRIBUTION_BAR}")
            } else {
                String::new()
            }
        ),
        ConfidenceTier::Unconfirmed => "Tier unconfirmed: no weight behind the winner.".to_string(),
    }
}

fn describe_contributions(log: &mut Transcript, tally: &Tally) {
    if !log.enabled() {
        return;
    }
    for org in tally.voting_organizations() {
        let Some(values) = tally.contributions(org) else {
            continue;
        };
        for (value, weight) in values {
            log.line(format!("{org} contributes {weight} to \"{value}\"."));
        }
        if tally.conflicted_organizations().contains(&org) {
            log.line(format!("{org} is conflicted: {} distinct values.", values.len()));
        }
    }
    if let (Some(literal), Some(pool)) = (tally.fallback(), tally.pooled_candidate()) {
        log.line(format!(
            "Fallback \"{literal}\" ({}) and the inheritance marker ({}) are pooled at {}, reported as \"{}\".",
            tally.total(literal),
            tally.total(&Value::InheritanceMarker),
            pool.total,
            pool.value
        ));
    }
}

/// Collects explanation lines only when enabled.
struct Transcript {
    lines: Option<Vec<String>>,
}

impl Transcript {
    fn new(enabled: bool) -> Self {
        Self {
            lines: enabled.then(Vec::new),
        }
    }

    fn enabled(&self) -> bool {
        self.lines.is_some()
    }

    fn line(&mut self, line: String) {
        if let Some(lines) = &mut self.lines {
            lines.push(line);
        }
    }

    fn finish(self) -> Option<Vec<String>> {
        self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn threshold(bar: u32, established: bool) -> VoteThreshold {
        VoteThreshold {
            approved_bar: bar,
            established_locale: established,
        }
    }

    #[test]
    fn tier_rules() {
        assert_eq!(tier_for_total(0, threshold(8, true)), ConfidenceTier::Unconfirmed);
        assert_eq!(tier_for_total(3, threshold(8, true)), ConfidenceTier::Provisional);
        assert_eq!(tier_for_total(4, threshold(8, true)), ConfidenceTier::Contributed);
        assert_eq!(tier_for_total(4, threshold(8, false)), ConfidenceTier::Provisional);
        assert_eq!(tier_for_total(8, threshold(8, false)), ConfidenceTier::Approved);
    }

    #[test]
    fn transcript_is_off_by_default() {
        let t = Transcript::new(false);
        assert!(!t.enabled());
        assert_eq!(t.finish(), None);
    }
}
