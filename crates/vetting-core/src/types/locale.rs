//! Locale identifiers: `language[_Script][_REGION][_VARIANT...]`.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::constants::{ROOT_LOCALE, ROOT_SYNONYMS};
use crate::errors::HierarchyError;

/// An immutable, canonicalised locale identifier.
///
/// Parsing accepts `-` or `_` separators and normalises case per subtag, so
/// `en-latn-us` and `en_Latn_US` are the same id. `und` becomes `root`.
/// Cloning is a refcount bump.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocaleId(Arc<str>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Subtag {
    Script,
    Region,
    Variant,
}

impl LocaleId {
    /// Parse and canonicalise a locale id.
    pub fn parse(id: &str) -> Result<Self, HierarchyError> {
        let invalid = |message: &str| HierarchyError::InvalidLocaleId {
            id: id.to_string(),
            message: message.to_string(),
        };

        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(invalid("empty locale id"));
        }

        let mut parts = trimmed.split(['_', '-']);
        let language = parts.next().unwrap_or_default().to_ascii_lowercase();
        let rest: Vec<&str> = parts.collect();

        if ROOT_SYNONYMS.contains(&language.as_str()) && rest.is_empty() {
            return Ok(Self::root());
        }
        if language == ROOT_LOCALE {
            return Err(invalid("root takes no subtags"));
        }
        if !(2..=8).contains(&language.len()) || !language.bytes().all(|b| b.is_ascii_alphabetic())
        {
            return Err(invalid("language must be 2-8 letters"));
        }

        let mut canonical = language;
        let mut last: Option<Subtag> = None;
        for part in rest {
            let kind = classify(part, last).ok_or_else(|| invalid("unrecognised subtag"))?;
            canonical.push('_');
            match kind {
                Subtag::Script => {
                    let mut chars = part.chars();
                    if let Some(first) = chars.next() {
                        canonical.push(first.to_ascii_uppercase());
                    }
                    canonical.extend(chars.map(|c| c.to_ascii_lowercase()));
                }
                Subtag::Region | Subtag::Variant => canonical.push_str(&part.to_ascii_uppercase()),
            }
            last = Some(kind);
        }

        Ok(Self(Arc::from(canonical)))
    }

    /// The terminal ancestor.
    pub fn root() -> Self {
        Self(Arc::from(ROOT_LOCALE))
    }

    pub fn is_root(&self) -> bool {
        &*self.0 == ROOT_LOCALE
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Strip the rightmost subtag; a bare language's parent is root.
    /// Root has no parent.
    pub fn simple_parent(&self) -> Option<LocaleId> {
        if self.is_root() {
            return None;
        }
        match self.0.rfind('_') {
            Some(idx) => Some(Self(Arc::from(&self.0[..idx]))),
            None => Some(Self::root()),
        }
    }

    /// Language subtag (`root` for root).
    pub fn language(&self) -> &str {
        self.0.split('_').next().unwrap_or(&self.0)
    }

    pub fn script(&self) -> Option<&str> {
        self.subtags()
            .find(|(kind, _)| *kind == Subtag::Script)
            .map(|(_, s)| s)
    }

    pub fn region(&self) -> Option<&str> {
        self.subtags()
            .find(|(kind, _)| *kind == Subtag::Region)
            .map(|(_, s)| s)
    }

    pub fn variants(&self) -> impl Iterator<Item = &str> {
        self.subtags()
            .filter(|(kind, _)| *kind == Subtag::Variant)
            .map(|(_, s)| s)
    }

    /// Number of subtags after the language.
    pub fn depth(&self) -> usize {
        if self.is_root() {
            0
        } else {
            self.0.matches('_').count() + 1
        }
    }

    /// Subtags after the language, classified. The stored form is already
    /// canonical, so classification cannot fail here.
    fn subtags(&self) -> impl Iterator<Item = (Subtag, &str)> {
        let mut last = None;
        self.0.split('_').skip(1).filter_map(move |part| {
            let kind = classify(part, last)?;
            last = Some(kind);
            Some((kind, part))
        })
    }
}

/// Decide what a subtag is from its shape and what preceded it.
fn classify(part: &str, last: Option<Subtag>) -> Option<Subtag> {
    let len = part.len();
    let alpha = part.bytes().all(|b| b.is_ascii_alphabetic());
    let digits = part.bytes().all(|b| b.is_ascii_digit());
    let alnum = part.bytes().all(|b| b.is_ascii_alphanumeric());

    if last.is_none() && len == 4 && alpha {
        return Some(Subtag::Script);
    }
    if matches!(last, None | Some(Subtag::Script)) && ((len == 2 && alpha) || (len == 3 && digits)) {
        return Some(Subtag::Region);
    }
    if (4..=8).contains(&len) && alnum {
        return Some(Subtag::Variant);
    }
    None
}

impl fmt::Display for LocaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LocaleId {
    type Err = HierarchyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for LocaleId {
    type Error = HierarchyError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<LocaleId> for String {
    fn from(id: LocaleId) -> Self {
        id.0.to_string()
    }
}

impl AsRef<str> for LocaleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
