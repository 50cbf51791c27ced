//! Field path aliasing, applied when a fallback walk misses at root.

use vetting_core::errors::FieldPathError;
use vetting_core::FieldPath;

/// Explicit prefix aliases plus the built-in attribute fallbacks.
///
/// Rules, first match wins:
/// 1. the longest explicit prefix is replaced by its target;
/// 2. an `alt` attribute is dropped;
/// 3. a `count` other than `other` becomes `other`;
///    `count="other"` on a `displayName` leaf is dropped.
#[derive(Debug, Clone, Default)]
pub struct PathAliasTable {
    /// (prefix, target), longest prefix first.
    entries: Vec<(String, String)>,
}

impl PathAliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `prefix -> target`. Both must be valid paths.
    pub fn insert(&mut self, prefix: &str, target: &str) -> Result<(), FieldPathError> {
        let prefix = FieldPath::parse(prefix)?;
        let target = FieldPath::parse(target)?;
        let prefix = prefix.distinguishing().to_string();
        self.entries.retain(|(p, _)| *p != prefix);
        self.entries
            .push((prefix, target.distinguishing().to_string()));
        self.entries
            .sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
        Ok(())
    }

    pub fn with_alias(mut self, prefix: &str, target: &str) -> Result<Self, FieldPathError> {
        self.insert(prefix, target)?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The explicit entry whose prefix is the longest match for `path`.
    pub fn explicit_match(&self, path: &FieldPath) -> Option<(&str, &str)> {
        self.entries
            .iter()
            .find(|(prefix, _)| path.has_prefix(prefix))
            .map(|(p, t)| (p.as_str(), t.as_str()))
    }

    /// Rewrite `path` for the next step of the walk. Returns `path`
    /// unchanged when no rule applies.
    pub fn resolve(&self, path: &FieldPath) -> Result<FieldPath, FieldPathError> {
        if let Some((prefix, target)) = self.explicit_match(path) {
            return path.replace_prefix(prefix, target);
        }
        if path.attribute("alt").is_some() {
            return Ok(path.without_attribute("alt"));
        }
        match path.attribute("count") {
            Some("other") if path.leaf().name == "displayName" => {
                Ok(path.without_attribute("count"))
            }
            Some("other") | None => Ok(path.clone()),
            Some(_) => Ok(path.with_attribute("count", "other")),
        }
    }
}
