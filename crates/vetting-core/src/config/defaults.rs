//! Compiled defaults, the lowest configuration layer.

/// Steps a fallback walk may take before it is treated as cyclic.
pub const DEFAULT_MAX_CHAIN_DEPTH: u32 = 64;
/// Entries held by the resolution memo.
pub const DEFAULT_CACHE_CAPACITY: u64 = 100_000;
pub const DEFAULT_CACHE_ENABLED: bool = true;

pub const DEFAULT_TRANSCRIPT: bool = false;
/// Approved bar used by `StaticThresholdPolicy` when nothing overrides it.
pub const DEFAULT_APPROVED_BAR: u32 = 8;
pub const DEFAULT_ESTABLISHED: bool = false;

pub const DEFAULT_LOG_FILTER: &str = "vetting=info";

/// File name looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "vetting.toml";
