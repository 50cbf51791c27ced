//! # vetting-core
//!
//! Foundation crate for the vetting engine.
//! Defines locale and field identifiers, values, voters, confidence tiers,
//! errors, config, tracing, and constants. Every other crate depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::VettingConfig;
pub use errors::{VettingError, VettingResult};
pub use types::{
    ConfidenceTier, FieldPath, LocaleId, Organization, OrganizationTier, TrustLevel, Value,
    VoterId,
};
