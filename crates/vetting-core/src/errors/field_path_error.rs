//! Field path parse errors.

use super::error_code::{self, VettingErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum FieldPathError {
    #[error("Malformed field path '{path}': {reason}")]
    Malformed { path: String, reason: String },
}

impl VettingErrorCode for FieldPathError {
    fn error_code(&self) -> &'static str {
        error_code::INVALID_FIELD_PATH
    }
}
