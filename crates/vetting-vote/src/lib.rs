//! # vetting-vote
//!
//! Turns a ballot of trust-weighted proposals into a [`Decision`]: a winning
//! value, a confidence tier and a per-organization agreement report.
//!
//! - Each organization counts once per value, at its strongest member's weight.
//! - The literal fallback value and the inheritance marker are pooled.
//! - Numeric bars come from an injected [`ThresholdPolicy`].

pub mod ballot;
pub mod engine;
pub mod outcome;
pub mod policy;
pub mod tally;

pub use ballot::{Ballot, BallotBuilder, Baseline, Proposal, Vote};
pub use engine::{decide, VoteEngine};
pub use outcome::{Decision, OutcomeResolver, RunnerUp};
pub use policy::{StaticThresholdPolicy, ThresholdPolicy, VoteThreshold};
pub use tally::{tally, Candidate, Tally};
