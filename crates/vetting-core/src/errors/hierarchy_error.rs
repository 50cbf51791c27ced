//! Locale hierarchy errors.

use super::error_code::{self, VettingErrorCode};

/// Errors in locale identifiers and the locale parent/alias graph.
///
/// A cyclic hierarchy is a configuration fault: it should stop startup
/// validation, not surface per request.
#[derive(Debug, thiserror::Error)]
pub enum HierarchyError {
    #[error("Cyclic locale hierarchy at {locale}: {}", chain.join(" -> "))]
    CyclicLocaleHierarchy { locale: String, chain: Vec<String> },

    #[error("Invalid locale id '{id}': {message}")]
    InvalidLocaleId { id: String, message: String },
}

impl VettingErrorCode for HierarchyError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::CyclicLocaleHierarchy { .. } => error_code::CYCLIC_LOCALE_HIERARCHY,
            Self::InvalidLocaleId { .. } => error_code::INVALID_LOCALE_ID,
        }
    }
}
