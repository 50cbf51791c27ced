//! Ballot construction errors.

use std::fmt;

use super::error_code::{self, VettingErrorCode};
use crate::types::VoterId;

/// What exactly was wrong with a rejected ballot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BallotDefect {
    MissingLocale,
    MissingPath,
    NonPositiveWeight { voter: VoterId, weight: i64 },
    WeightOverflow { voter: VoterId, weight: i64 },
    DuplicateVoter { voter: VoterId },
}

impl fmt::Display for BallotDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingLocale => write!(f, "ballot has no locale"),
            Self::MissingPath => write!(f, "ballot has no field path"),
            Self::NonPositiveWeight { voter, weight } => {
                write!(f, "voter {voter} has non-positive weight {weight}")
            }
            Self::WeightOverflow { voter, weight } => {
                write!(f, "voter {voter} has out-of-range weight {weight}")
            }
            Self::DuplicateVoter { voter } => write!(f, "voter {voter} voted more than once"),
        }
    }
}

/// Errors raised while constructing a ballot. Resolution never fails
/// once a ballot exists.
#[derive(Debug, thiserror::Error)]
pub enum BallotError {
    #[error("Invalid ballot: {0}")]
    InvalidBallot(BallotDefect),
}

impl BallotError {
    /// The defect that caused the rejection.
    pub fn defect(&self) -> &BallotDefect {
        match self {
            Self::InvalidBallot(defect) => defect,
        }
    }
}

impl VettingErrorCode for BallotError {
    fn error_code(&self) -> &'static str {
        error_code::INVALID_BALLOT
    }
}
