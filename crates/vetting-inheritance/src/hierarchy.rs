//! Locale parent graph: explicit parent overrides and locale aliases over the
//! simple "strip the rightmost subtag" rule.

use std::collections::BTreeMap;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use tracing::warn;

use vetting_core::config::defaults::DEFAULT_MAX_CHAIN_DEPTH;
use vetting_core::errors::HierarchyError;
use vetting_core::LocaleId;

/// Serializable form of a hierarchy, as shipped in reference data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchySpec {
    /// child -> explicit parent.
    pub parents: BTreeMap<LocaleId, LocaleId>,
    /// alias -> replacement.
    pub aliases: BTreeMap<LocaleId, LocaleId>,
}

/// Read-only locale parent graph.
#[derive(Debug, Clone)]
pub struct LocaleHierarchy {
    explicit_parents: FxHashMap<LocaleId, LocaleId>,
    aliases: FxHashMap<LocaleId, LocaleId>,
    max_depth: u32,
}

impl Default for LocaleHierarchy {
    fn default() -> Self {
        Self {
            explicit_parents: FxHashMap::default(),
            aliases: FxHashMap::default(),
            max_depth: DEFAULT_MAX_CHAIN_DEPTH,
        }
    }
}

impl LocaleHierarchy {
    pub fn builder() -> LocaleHierarchyBuilder {
        LocaleHierarchyBuilder::default()
    }

    /// Build and validate a hierarchy from its serialized form.
    pub fn from_spec(spec: HierarchySpec, max_depth: u32) -> Result<Self, HierarchyError> {
        let mut builder = Self::builder().max_depth(max_depth);
        for (child, parent) in spec.parents {
            builder = builder.parent(child, parent);
        }
        for (from, to) in spec.aliases {
            builder = builder.alias(from, to);
        }
        builder.build()
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn explicit_parent(&self, locale: &LocaleId) -> Option<&LocaleId> {
        self.explicit_parents.get(locale)
    }

    /// Next ancestor: explicit override if present, else the simple parent.
    /// `None` only for root.
    pub fn parent(&self, locale: &LocaleId) -> Option<LocaleId> {
        if locale.is_root() {
            return None;
        }
        match self.explicit_parents.get(locale) {
            Some(parent) => Some(parent.clone()),
            None => locale.simple_parent(),
        }
    }

    /// Follow locale aliases until a non-aliased id is reached.
    pub fn canonicalize(&self, locale: &LocaleId) -> Result<LocaleId, HierarchyError> {
        let mut current = locale.clone();
        let mut seen = vec![current.to_string()];
        while let Some(target) = self.aliases.get(&current) {
            seen.push(target.to_string());
            if seen.len() as u32 > self.max_depth || seen[..seen.len() - 1].contains(&target.to_string()) {
                return Err(cyclic(locale, seen));
            }
            current = target.clone();
        }
        Ok(current)
    }

    /// Full ancestry from `locale` (canonicalised) down to root, inclusive.
    pub fn chain(&self, locale: &LocaleId) -> Result<Vec<LocaleId>, HierarchyError> {
        let start = self.canonicalize(locale)?;
        let mut chain = vec![start.clone()];
        let mut seen: FxHashSet<LocaleId> = FxHashSet::default();
        seen.insert(start.clone());

        let mut current = start;
        while let Some(parent) = self.parent(&current) {
            let repeated = !seen.insert(parent.clone());
            chain.push(parent.clone());
            if repeated || chain.len() as u32 > self.max_depth + 1 {
                return Err(cyclic(
                    locale,
                    chain.iter().map(ToString::to_string).collect(),
                ));
            }
            current = parent;
        }
        Ok(chain)
    }

    /// Check that every aliased or explicitly parented locale reaches root.
    pub fn validate(&self) -> Result<(), HierarchyError> {
        let mut starts: Vec<&LocaleId> = self
            .explicit_parents
            .keys()
            .chain(self.aliases.keys())
            .collect();
        starts.sort();
        for locale in starts {
            if let Err(err) = self.chain(locale) {
                warn!(locale = %locale, error = %err, "locale hierarchy does not terminate at root");
                return Err(err);
            }
        }
        Ok(())
    }
}

fn cyclic(locale: &LocaleId, chain: Vec<String>) -> HierarchyError {
    HierarchyError::CyclicLocaleHierarchy {
        locale: locale.to_string(),
        chain,
    }
}

/// Builder for [`LocaleHierarchy`]; `build` validates.
#[derive(Debug, Default)]
pub struct LocaleHierarchyBuilder {
    explicit_parents: FxHashMap<LocaleId, LocaleId>,
    aliases: FxHashMap<LocaleId, LocaleId>,
    max_depth: Option<u32>,
}

impl LocaleHierarchyBuilder {
    pub fn parent(mut self, child: LocaleId, parent: LocaleId) -> Self {
        self.explicit_parents.insert(child, parent);
        self
    }

    pub fn alias(mut self, from: LocaleId, to: LocaleId) -> Self {
        self.aliases.insert(from, to);
        self
    }

    pub fn max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn build(self) -> Result<LocaleHierarchy, HierarchyError> {
        let hierarchy = LocaleHierarchy {
            explicit_parents: self.explicit_parents,
            aliases: self.aliases,
            max_depth: self.max_depth.unwrap_or(DEFAULT_MAX_CHAIN_DEPTH),
        };
        hierarchy.validate()?;
        Ok(hierarchy)
    }

    /// Build without validation, for callers that validate separately.
    pub fn build_unchecked(self) -> LocaleHierarchy {
        LocaleHierarchy {
            explicit_parents: self.explicit_parents,
            aliases: self.aliases,
            max_depth: self.max_depth.unwrap_or(DEFAULT_MAX_CHAIN_DEPTH),
        }
    }
}
