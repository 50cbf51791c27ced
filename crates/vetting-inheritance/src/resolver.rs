//! Fallback (bailey) resolver.
//!
//! `resolve(locale, path)` walks locale -> parent -> ... -> root with the
//! requested path and returns the first stored value that is not the
//! inheritance marker. Only when root misses is the path rewritten through
//! [`PathAliasTable`], and the walk restarts from the starting locale with the
//! rewritten path. When no rewrite applies, constructable language display
//! names are assembled by [`DisplayNameConstructor`].
//!
//! `bailey(locale, path)` skips the start locale's own value on the first
//! walk: what the field would show if that locale had no value. Ballots use
//! it as their fallback.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use vetting_core::config::InheritanceConfig;
use vetting_core::constants::CONSTRUCTED_PATH;
use vetting_core::errors::HierarchyError;
use vetting_core::{FieldPath, LocaleId, Value, VettingResult};

use crate::cache::{CacheKey, CacheStats, LookupMode, ResolutionCache};
use crate::constructed::DisplayNameConstructor;
use crate::hierarchy::LocaleHierarchy;
use crate::path_alias::PathAliasTable;
use crate::snapshot::LocaleData;

/// Where a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum FoundPath {
    /// A stored value at this (possibly aliased) path.
    Stored(FieldPath),
    /// Built by the display-name constructor; corresponds to no stored path.
    Constructed,
}

impl FoundPath {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Stored(path) => path.distinguishing(),
            Self::Constructed => CONSTRUCTED_PATH,
        }
    }

    pub fn is_constructed(&self) -> bool {
        matches!(self, Self::Constructed)
    }
}

impl From<FoundPath> for String {
    fn from(found: FoundPath) -> Self {
        found.as_str().to_string()
    }
}

impl fmt::Display for FoundPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A successful fallback lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub value: Value,
    pub found_locale: LocaleId,
    pub found_path: FoundPath,
}

/// Current snapshot and the epoch it was installed under. Swapped together.
struct Snapshot {
    epoch: u64,
    data: Arc<LocaleData>,
}

pub struct FallbackResolver {
    hierarchy: LocaleHierarchy,
    aliases: PathAliasTable,
    constructor: DisplayNameConstructor,
    state: RwLock<Snapshot>,
    cache: Option<ResolutionCache>,
    max_depth: u32,
}

impl FallbackResolver {
    /// Resolver with the default inheritance config.
    pub fn new(hierarchy: LocaleHierarchy, aliases: PathAliasTable, data: LocaleData) -> Self {
        let config = InheritanceConfig {
            max_chain_depth: Some(hierarchy.max_depth()),
            ..InheritanceConfig::default()
        };
        Self::with_config(hierarchy, aliases, data, &config)
    }

    pub fn with_config(
        hierarchy: LocaleHierarchy,
        aliases: PathAliasTable,
        data: LocaleData,
        config: &InheritanceConfig,
    ) -> Self {
        let cache = config
            .effective_cache_enabled()
            .then(|| ResolutionCache::new(config.effective_cache_capacity()));
        Self {
            hierarchy,
            aliases,
            constructor: DisplayNameConstructor::new(),
            state: RwLock::new(Snapshot {
                epoch: 0,
                data: Arc::new(data),
            }),
            cache,
            max_depth: config.effective_max_chain_depth(),
        }
    }

    pub fn hierarchy(&self) -> &LocaleHierarchy {
        &self.hierarchy
    }

    pub fn epoch(&self) -> u64 {
        self.current().0
    }

    /// The snapshot currently being served.
    pub fn snapshot(&self) -> Arc<LocaleData> {
        self.current().1
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache
            .as_ref()
            .map(ResolutionCache::stats)
            .unwrap_or_default()
    }

    /// Value, locale and path that `locale` shows for `path`.
    /// `Ok(None)` means nothing is defined anywhere on the chain.
    #[instrument(skip_all, fields(locale = %locale, path = %path))]
    pub fn resolve(&self, locale: &LocaleId, path: &FieldPath) -> VettingResult<Option<Resolution>> {
        let (epoch, data) = self.current();
        let locale = self.hierarchy.canonicalize(locale)?;
        self.lookup(epoch, &data, &locale, path, LookupMode::Resolve)
    }

    /// What `locale` would show for `path` if it had no value of its own.
    #[instrument(skip_all, fields(locale = %locale, path = %path))]
    pub fn bailey(&self, locale: &LocaleId, path: &FieldPath) -> VettingResult<Option<Resolution>> {
        let (epoch, data) = self.current();
        let locale = self.hierarchy.canonicalize(locale)?;
        self.lookup(epoch, &data, &locale, path, LookupMode::Bailey)
    }

    pub fn resolve_fallback(
        &self,
        locale: &LocaleId,
        path: &FieldPath,
    ) -> VettingResult<Option<Value>> {
        Ok(self.resolve(locale, path)?.map(|r| r.value))
    }

    pub fn bailey_value(&self, locale: &LocaleId, path: &FieldPath) -> VettingResult<Option<Value>> {
        Ok(self.bailey(locale, path)?.map(|r| r.value))
    }

    /// Swap in a new snapshot. Returns the new epoch.
    ///
    /// The epoch bump and the swap happen under the write lock; the memo is
    /// cleared afterwards, and anything an in-flight reader writes back is
    /// tagged with the old epoch and ignored.
    pub fn reload(&self, data: LocaleData) -> u64 {
        let values = data.len();
        let epoch = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            state.epoch += 1;
            state.data = Arc::new(data);
            state.epoch
        };
        if let Some(cache) = &self.cache {
            cache.invalidate_all();
        }
        info!(epoch, values, "locale data reloaded");
        epoch
    }

    fn current(&self) -> (u64, Arc<LocaleData>) {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        (state.epoch, Arc::clone(&state.data))
    }

    fn lookup(
        &self,
        epoch: u64,
        data: &LocaleData,
        locale: &LocaleId,
        path: &FieldPath,
        mode: LookupMode,
    ) -> VettingResult<Option<Resolution>> {
        let key = CacheKey {
            locale: locale.clone(),
            path: path.clone(),
            mode,
        };
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(&key, epoch) {
                debug!(epoch, ?mode, "resolution cache hit");
                return Ok(hit);
            }
            debug!(epoch, ?mode, "resolution cache miss");
        }

        let result = self.walk(epoch, data, locale, path, mode)?;
        if let Some(cache) = &self.cache {
            cache.insert(key, epoch, result.clone());
        }
        Ok(result)
    }

    fn walk(
        &self,
        epoch: u64,
        data: &LocaleData,
        start: &LocaleId,
        requested: &FieldPath,
        mode: LookupMode,
    ) -> VettingResult<Option<Resolution>> {
        let mut path = requested.clone();
        let mut skip_own = mode == LookupMode::Bailey;
        let mut rewrites = vec![path.to_string()];

        for _ in 0..self.max_depth {
            if let Some(found) = self.find_in_chain(data, start, &path, skip_own)? {
                return Ok(Some(found));
            }
            // A rewritten path is looked up in full, own value included.
            skip_own = false;

            let next = self.aliases.resolve(&path)?;
            if next == path {
                return match mode {
                    LookupMode::Inherited => Ok(None),
                    LookupMode::Resolve | LookupMode::Bailey => {
                        self.construct(epoch, data, start, requested)
                    }
                };
            }
            path = next;
            rewrites.push(path.to_string());
        }

        warn!(locale = %start, path = %requested, depth = self.max_depth, "path alias rewrites exceeded max depth");
        Err(HierarchyError::CyclicLocaleHierarchy {
            locale: start.to_string(),
            chain: rewrites,
        }
        .into())
    }

    /// First non-marker value for `path` on the chain from `start` to root.
    fn find_in_chain(
        &self,
        data: &LocaleData,
        start: &LocaleId,
        path: &FieldPath,
        mut skip_own: bool,
    ) -> Result<Option<Resolution>, HierarchyError> {
        let mut locale = start.clone();
        let mut chain = vec![locale.to_string()];

        for _ in 0..self.max_depth {
            if !skip_own {
                if let Some(value) = data.get(&locale, path) {
                    if !value.is_inheritance_marker() {
                        return Ok(Some(Resolution {
                            value: value.clone(),
                            found_locale: locale,
                            found_path: FoundPath::Stored(path.clone()),
                        }));
                    }
                }
            }
            skip_own = false;

            match self.hierarchy.parent(&locale) {
                Some(parent) => {
                    locale = parent;
                    chain.push(locale.to_string());
                }
                None => return Ok(None),
            }
        }

        warn!(locale = %start, depth = self.max_depth, "locale chain exceeded max depth");
        Err(HierarchyError::CyclicLocaleHierarchy {
            locale: start.to_string(),
            chain,
        })
    }

    fn construct(
        &self,
        epoch: u64,
        data: &LocaleData,
        locale: &LocaleId,
        path: &FieldPath,
    ) -> VettingResult<Option<Resolution>> {
        let built = self.constructor.construct(path, |component| {
            Ok(self
                .lookup(epoch, data, locale, component, LookupMode::Inherited)?
                .map(|r| r.value))
        })?;
        Ok(built.map(|name| {
            debug!(locale = %locale, path = %path, "constructed display name");
            Resolution {
                value: Value::new(name),
                found_locale: locale.clone(),
                found_path: FoundPath::Constructed,
            }
        }))
    }
}

impl fmt::Debug for FallbackResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FallbackResolver")
            .field("epoch", &self.epoch())
            .field("max_depth", &self.max_depth)
            .field("cache_enabled", &self.cache.is_some())
            .finish()
    }
}
