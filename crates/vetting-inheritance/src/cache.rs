//! Epoch-tagged memo for fallback resolutions.
//!
//! Uses `moka::sync::Cache`. Every entry records the snapshot epoch it was
//! computed against; a lookup under a different epoch counts as a stale miss,
//! so a reader that raced a reload can never serve the old snapshot's answer.

use std::sync::atomic::{AtomicU64, Ordering};

use moka::sync::Cache;
use serde::Serialize;

use vetting_core::{FieldPath, LocaleId};

use crate::resolver::Resolution;

/// Which entry point produced a memoised resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupMode {
    /// Includes the start locale's own value.
    Resolve,
    /// Skips the start locale's own value.
    Bailey,
    /// Stored and inherited values only; nothing is constructed.
    Inherited,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub locale: LocaleId,
    pub path: FieldPath,
    pub mode: LookupMode,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    epoch: u64,
    resolution: Option<Resolution>,
}

/// Counters for observing memo effectiveness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Misses caused by an entry from an older epoch.
    pub stale: u64,
    pub entries: u64,
}

pub struct ResolutionCache {
    cache: Cache<CacheKey, CacheEntry>,
    hits: AtomicU64,
    misses: AtomicU64,
    stale: AtomicU64,
}

impl ResolutionCache {
    pub fn new(capacity: u64) -> Self {
        Self {
            cache: Cache::builder().max_capacity(capacity).build(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            stale: AtomicU64::new(0),
        }
    }

    /// Look up `key` for `epoch`. The outer `Option` is hit/miss; the inner
    /// one is the memoised result, which may itself be "missing".
    pub fn get(&self, key: &CacheKey, epoch: u64) -> Option<Option<Resolution>> {
        match self.cache.get(key) {
            Some(entry) if entry.epoch == epoch => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.resolution)
            }
            Some(_) => {
                self.stale.fetch_add(1, Ordering::Relaxed);
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Record a result computed against `epoch`, overwriting any older entry.
    pub fn insert(&self, key: CacheKey, epoch: u64, resolution: Option<Resolution>) {
        self.cache.insert(key, CacheEntry { epoch, resolution });
    }

    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.run_pending_tasks();
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            stale: self.stale.load(Ordering::Relaxed),
            entries: self.cache.entry_count(),
        }
    }
}

impl std::fmt::Debug for ResolutionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolutionCache")
            .field("stats", &self.stats())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::FoundPath;
    use vetting_core::Value;

    fn key() -> CacheKey {
        CacheKey {
            locale: LocaleId::parse("de").unwrap(),
            path: FieldPath::parse("//ldml/characters/exemplarCharacters").unwrap(),
            mode: LookupMode::Resolve,
        }
    }

    fn resolution() -> Resolution {
        Resolution {
            value: Value::new("[a-z]"),
            found_locale: LocaleId::root(),
            found_path: FoundPath::Stored(key().path),
        }
    }

    #[test]
    fn hit_requires_matching_epoch() {
        let cache = ResolutionCache::new(16);
        cache.insert(key(), 1, Some(resolution()));

        assert_eq!(cache.get(&key(), 1), Some(Some(resolution())));
        assert_eq!(cache.get(&key(), 2), None);

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.stale, 1);
    }

    #[test]
    fn missing_results_are_memoised() {
        let cache = ResolutionCache::new(16);
        cache.insert(key(), 0, None);
        assert_eq!(cache.get(&key(), 0), Some(None));
    }

    #[test]
    fn invalidate_all_clears() {
        let cache = ResolutionCache::new(16);
        cache.insert(key(), 0, Some(resolution()));
        cache.invalidate_all();
        assert_eq!(cache.get(&key(), 0), None);
    }
}
