//! Entry points: `decide` for one ballot, `VoteEngine` for config-driven and
//! batch use.

use std::sync::Arc;

use rayon::prelude::*;
use tracing::{info, instrument};

use vetting_core::{VettingConfig, VettingResult};

use crate::ballot::Ballot;
use crate::outcome::{Decision, OutcomeResolver};
use crate::policy::{StaticThresholdPolicy, ThresholdPolicy};
use crate::tally::tally;

/// Decide one ballot. Pure: the same ballot and policy always give the same
/// decision.
pub fn decide<P>(ballot: &Ballot, policy: &P) -> Decision
where
    P: ThresholdPolicy + ?Sized,
{
    OutcomeResolver::new().resolve(ballot, &tally(ballot), policy)
}

/// Decision engine carrying its configuration and threshold policy.
#[derive(Clone)]
pub struct VoteEngine {
    resolver: OutcomeResolver,
    policy: Arc<dyn ThresholdPolicy>,
}

impl VoteEngine {
    /// Engine with a [`StaticThresholdPolicy`] built from `config.voting`.
    pub fn new(config: &VettingConfig) -> VettingResult<Self> {
        let policy = StaticThresholdPolicy::from_config(&config.voting)?;
        Ok(Self::with_policy(config, Arc::new(policy)))
    }

    pub fn with_policy(config: &VettingConfig, policy: Arc<dyn ThresholdPolicy>) -> Self {
        info!(
            transcript = config.voting.effective_transcript(),
            "vote engine initialized"
        );
        Self {
            resolver: OutcomeResolver::new().with_transcript(config.voting.effective_transcript()),
            policy,
        }
    }

    pub fn policy(&self) -> &dyn ThresholdPolicy {
        self.policy.as_ref()
    }

    #[instrument(skip_all, fields(locale = %ballot.locale(), path = %ballot.path()))]
    pub fn decide(&self, ballot: &Ballot) -> Decision {
        self.resolver
            .resolve(ballot, &tally(ballot), self.policy.as_ref())
    }

    /// Decide with a one-off policy instead of the engine's own.
    pub fn decide_with<P>(&self, ballot: &Ballot, policy: &P) -> Decision
    where
        P: ThresholdPolicy + ?Sized,
    {
        self.resolver.resolve(ballot, &tally(ballot), policy)
    }

    /// Decide independent ballots in parallel. Output order matches input.
    pub fn decide_batch(&self, ballots: &[Ballot]) -> Vec<Decision> {
        ballots.par_iter().map(|ballot| self.decide(ballot)).collect()
    }
}

impl Default for VoteEngine {
    fn default() -> Self {
        Self::with_policy(
            &VettingConfig::default(),
            Arc::new(StaticThresholdPolicy::default()),
        )
    }
}

impl std::fmt::Debug for VoteEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoteEngine")
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}
