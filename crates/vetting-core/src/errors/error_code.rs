//! VettingErrorCode trait for the service boundary.

/// Stable, machine-readable error codes.
///
/// The REST layer that wraps this engine reports these codes to clients,
/// so the strings must not change between releases.
pub trait VettingErrorCode {
    /// Returns the error code string (e.g., "INVALID_BALLOT").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted boundary string: `[ERROR_CODE] message`.
    fn boundary_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const INVALID_BALLOT: &str = "INVALID_BALLOT";
pub const CYCLIC_LOCALE_HIERARCHY: &str = "CYCLIC_LOCALE_HIERARCHY";
pub const INVALID_LOCALE_ID: &str = "INVALID_LOCALE_ID";
pub const INVALID_FIELD_PATH: &str = "INVALID_FIELD_PATH";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
