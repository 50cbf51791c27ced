//! Identifiers and value types shared by the resolver and the vote engine.

pub mod collections;
pub mod field_path;
pub mod locale;
pub mod tier;
pub mod value;
pub mod voter;

pub use collections::{FxHashMap, FxHashSet};
pub use field_path::{FieldPath, PathElement};
pub use locale::LocaleId;
pub use tier::{ConfidenceTier, OrganizationTier};
pub use value::Value;
pub use voter::{Organization, TrustLevel, VoterId};
