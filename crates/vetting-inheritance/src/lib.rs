//! # vetting-inheritance
//!
//! Fallback ("bailey") resolution: the value a field would have in a locale
//! if nobody had voted on it there.
//!
//! The walk goes locale -> explicit or simple parent -> ... -> root with the
//! requested field path. A miss at root rewrites the path through aliases
//! and restarts from the starting locale; when no rewrite applies, language
//! display names are constructed. Results are memoised per snapshot
//! epoch; a reload invalidates the whole memo.

pub mod cache;
pub mod constructed;
pub mod hierarchy;
pub mod path_alias;
pub mod resolver;
pub mod snapshot;

pub use cache::{CacheStats, LookupMode, ResolutionCache};
pub use constructed::DisplayNameConstructor;
pub use hierarchy::{HierarchySpec, LocaleHierarchy, LocaleHierarchyBuilder};
pub use path_alias::PathAliasTable;
pub use resolver::{FallbackResolver, FoundPath, Resolution};
pub use snapshot::{LocaleData, LocaleDataBuilder, LocaleDocument};
