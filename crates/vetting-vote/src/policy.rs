//! Threshold policy seam.
//!
//! Approved bars and the "established locale" predicate are reference data
//! owned by the caller; the engine only asks for them per field.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use vetting_core::config::VotingConfig;
use vetting_core::errors::HierarchyError;
use vetting_core::{FieldPath, LocaleId};
use vetting_inheritance::LocaleHierarchy;

/// Numeric bars for one field in one locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoteThreshold {
    /// Pooled total at which a winner is `approved`.
    pub approved_bar: u32,
    /// Whether `contributed` is reachable in this locale.
    pub established_locale: bool,
}

/// Supplies vote thresholds per `(locale, path)`.
///
/// Any `Fn(&LocaleId, &FieldPath) -> VoteThreshold` is a policy.
pub trait ThresholdPolicy: Send + Sync {
    fn threshold(&self, locale: &LocaleId, path: &FieldPath) -> VoteThreshold;
}

impl<F> ThresholdPolicy for F
where
    F: Fn(&LocaleId, &FieldPath) -> VoteThreshold + Send + Sync,
{
    fn threshold(&self, locale: &LocaleId, path: &FieldPath) -> VoteThreshold {
        self(locale, path)
    }
}

/// Config-backed policy: one approved bar everywhere, and a set of
/// established locales.
///
/// A listed locale covers every locale whose ancestor chain reaches it. The
/// chain follows simple parents unless a [`LocaleHierarchy`] is attached with
/// [`with_hierarchy`](Self::with_hierarchy), in which case explicit parents
/// and locale aliases apply too (`en_001` then covers `en_AU`).
#[derive(Debug, Clone)]
pub struct StaticThresholdPolicy {
    approved_bar: u32,
    established_by_default: bool,
    established: BTreeSet<LocaleId>,
    hierarchy: Option<Arc<LocaleHierarchy>>,
}

impl StaticThresholdPolicy {
    pub fn new(approved_bar: u32, established_by_default: bool) -> Self {
        Self {
            approved_bar,
            established_by_default,
            established: BTreeSet::new(),
            hierarchy: None,
        }
    }

    pub fn from_config(config: &VotingConfig) -> Result<Self, HierarchyError> {
        let mut policy = Self::new(
            config.effective_approved_bar(),
            config.effective_established_by_default(),
        );
        for raw in &config.established_locales {
            policy.established.insert(LocaleId::parse(raw)?);
        }
        Ok(policy)
    }

    pub fn with_established(mut self, locale: LocaleId) -> Self {
        self.established.insert(locale);
        self
    }

    /// Resolve ancestors through `hierarchy` instead of simple parents.
    pub fn with_hierarchy(mut self, hierarchy: Arc<LocaleHierarchy>) -> Self {
        self.hierarchy = Some(hierarchy);
        self
    }

    pub fn is_established(&self, locale: &LocaleId) -> bool {
        if self.established_by_default {
            return true;
        }
        self.ancestors(locale)
            .iter()
            .filter(|id| !id.is_root())
            .any(|id| self.established.contains(id))
    }

    fn ancestors(&self, locale: &LocaleId) -> Vec<LocaleId> {
        if let Some(hierarchy) = &self.hierarchy {
            match hierarchy.chain(locale) {
                Ok(chain) => return chain,
                Err(err) => warn!(%locale, error = %err, "falling back to simple parents"),
            }
        }
        std::iter::successors(Some(locale.clone()), LocaleId::simple_parent).collect()
    }
}

impl Default for StaticThresholdPolicy {
    fn default() -> Self {
        Self::from_config(&VotingConfig::default())
            .unwrap_or_else(|_| Self::new(8, false))
    }
}

impl ThresholdPolicy for StaticThresholdPolicy {
    fn threshold(&self, locale: &LocaleId, _path: &FieldPath) -> VoteThreshold {
        VoteThreshold {
            approved_bar: self.approved_bar,
            established_locale: self.is_established(locale),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> LocaleId {
        LocaleId::parse(s).unwrap()
    }

    #[test]
    fn closures_are_policies() {
        let policy = |locale: &LocaleId, _: &FieldPath| VoteThreshold {
            approved_bar: if locale.language() == "mt" { 20 } else { 8 },
            established_locale: false,
        };
        let path = FieldPath::parse("//ldml/x").unwrap();
        assert_eq!(policy.threshold(&id("mt"), &path).approved_bar, 20);
        assert_eq!(policy.threshold(&id("de"), &path).approved_bar, 8);
    }

    #[test]
    fn established_covers_sublocales() {
        let policy = StaticThresholdPolicy::new(8, false).with_established(id("de"));
        assert!(policy.is_established(&id("de")));
        assert!(policy.is_established(&id("de_AT")));
        assert!(!policy.is_established(&id("fr")));
        assert!(!policy.is_established(&LocaleId::root()));
    }

    #[test]
    fn from_config_reads_locales() {
        let config = VotingConfig {
            default_approved_bar: Some(12),
            established_locales: vec!["fr-CA".into()],
            ..VotingConfig::default()
        };
        let policy = StaticThresholdPolicy::from_config(&config).unwrap();
        let path = FieldPath::parse("//ldml/x").unwrap();
        let t = policy.threshold(&id("fr_CA"), &path);
        assert_eq!(t.approved_bar, 12);
        assert!(t.established_locale);
    }

    #[test]
    fn hierarchy_parents_extend_coverage() {
        let hierarchy = Arc::new(
            LocaleHierarchy::builder()
                .parent(id("en_AU"), id("en_001"))
                .build()
                .unwrap(),
        );
        let simple = StaticThresholdPolicy::new(8, false).with_established(id("en_001"));
        assert!(!simple.is_established(&id("en_AU")));

        let policy = simple.with_hierarchy(hierarchy);
        assert!(policy.is_established(&id("en_AU")));
        assert!(policy.is_established(&id("en_001")));
        assert!(!policy.is_established(&id("en")));
        assert!(!policy.is_established(&id("en_GB")));
    }
}
