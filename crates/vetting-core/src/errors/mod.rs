//! Error handling for the vetting engine.
//! One error enum per subsystem, `thiserror` only.
//!
//! Fallback resolution that finds nothing is not an error: it is `Ok(None)`.

pub mod ballot_error;
pub mod config_error;
pub mod error_code;
pub mod field_path_error;
pub mod hierarchy_error;

pub use ballot_error::{BallotDefect, BallotError};
pub use config_error::ConfigError;
pub use error_code::VettingErrorCode;
pub use field_path_error::FieldPathError;
pub use hierarchy_error::HierarchyError;

/// Top-level error aggregating every subsystem via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum VettingError {
    #[error("Ballot error: {0}")]
    Ballot(#[from] BallotError),

    #[error("Hierarchy error: {0}")]
    Hierarchy(#[from] HierarchyError),

    #[error("Field path error: {0}")]
    FieldPath(#[from] FieldPathError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl VettingErrorCode for VettingError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Ballot(e) => e.error_code(),
            Self::Hierarchy(e) => e.error_code(),
            Self::FieldPath(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type VettingResult<T> = Result<T, VettingError>;
