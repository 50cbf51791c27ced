//! Field paths: `//ldml/elem[@attr="value"]/...`.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::constants::NON_DISTINGUISHING_ATTRIBUTES;
use crate::errors::FieldPathError;

/// One `/`-separated step of a field path, attributes in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
}

impl PathElement {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn write(&self, out: &mut String, distinguishing_only: bool) {
        out.push('/');
        out.push_str(&self.name);
        for (k, v) in &self.attributes {
            if distinguishing_only && is_non_distinguishing(k) {
                continue;
            }
            out.push_str("[@");
            out.push_str(k);
            out.push_str("=\"");
            out.push_str(v);
            out.push_str("\"]");
        }
    }
}

pub fn is_non_distinguishing(attribute: &str) -> bool {
    NON_DISTINGUISHING_ATTRIBUTES.contains(&attribute)
}

/// An immutable field path.
///
/// Identity (equality, hashing, ordering) is the distinguishing form; the
/// full form also keeps `draft`, `references`, `standard` and
/// `validSubLocales`.
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldPath {
    elements: Arc<[PathElement]>,
    distinguishing: Arc<str>,
    full: Arc<str>,
}

impl FieldPath {
    pub fn parse(path: &str) -> Result<Self, FieldPathError> {
        let elements = Scanner::new(path).elements()?;
        Ok(Self::from_elements(elements))
    }

    fn from_elements(elements: Vec<PathElement>) -> Self {
        let mut distinguishing = String::new();
        let mut full = String::new();
        for element in &elements {
            // Paths always render with a leading `//`.
            if distinguishing.is_empty() {
                distinguishing.push('/');
                full.push('/');
            }
            element.write(&mut distinguishing, true);
            element.write(&mut full, false);
        }
        Self {
            elements: elements.into(),
            distinguishing: Arc::from(distinguishing),
            full: Arc::from(full),
        }
    }

    pub fn distinguishing(&self) -> &str {
        &self.distinguishing
    }

    pub fn full(&self) -> &str {
        &self.full
    }

    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    /// Last element. Parsing guarantees at least one.
    pub fn leaf(&self) -> &PathElement {
        &self.elements[self.elements.len() - 1]
    }

    /// Value of `name`, searching from the leaf towards the root.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.elements.iter().rev().find_map(|e| e.attribute(name))
    }

    /// Sets `name` on the deepest element that carries it, or on the leaf.
    pub fn with_attribute(&self, name: &str, value: &str) -> Self {
        let mut elements = self.elements.to_vec();
        let idx = elements
            .iter()
            .rposition(|e| e.attribute(name).is_some())
            .unwrap_or(elements.len() - 1);
        let element = &mut elements[idx];
        match element.attributes.iter_mut().find(|(k, _)| k == name) {
            Some(slot) => slot.1 = value.to_string(),
            None => element
                .attributes
                .push((name.to_string(), value.to_string())),
        }
        Self::from_elements(elements)
    }

    /// Removes `name` from every element.
    pub fn without_attribute(&self, name: &str) -> Self {
        let elements = self
            .elements
            .iter()
            .map(|e| PathElement {
                name: e.name.clone(),
                attributes: e
                    .attributes
                    .iter()
                    .filter(|(k, _)| k != name)
                    .cloned()
                    .collect(),
            })
            .collect();
        Self::from_elements(elements)
    }

    /// True when the distinguishing form starts with `prefix` at an element
    /// or attribute boundary.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        match self.distinguishing.strip_prefix(prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('['),
            None => false,
        }
    }

    /// Replace a leading `prefix` of the distinguishing form with `target`.
    pub fn replace_prefix(&self, prefix: &str, target: &str) -> Result<Self, FieldPathError> {
        let rest = self
            .distinguishing
            .strip_prefix(prefix)
            .unwrap_or(&self.distinguishing);
        Self::parse(&format!("{target}{rest}"))
    }
}

impl PartialEq for FieldPath {
    fn eq(&self, other: &Self) -> bool {
        self.distinguishing == other.distinguishing
    }
}

impl Eq for FieldPath {}

impl Hash for FieldPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.distinguishing.hash(state);
    }
}

impl PartialOrd for FieldPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FieldPath {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distinguishing.cmp(&other.distinguishing)
    }
}

impl fmt::Debug for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldPath({})", self.full)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.distinguishing)
    }
}

impl FromStr for FieldPath {
    type Err = FieldPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for FieldPath {
    type Error = FieldPathError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<FieldPath> for String {
    fn from(p: FieldPath) -> Self {
        p.full.to_string()
    }
}

/// Single-pass scanner over the path text.
struct Scanner<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
        }
    }

    fn error(&self, reason: impl Into<String>) -> FieldPathError {
        FieldPathError::Malformed {
            path: self.src.to_string(),
            reason: format!("{} at byte {}", reason.into(), self.pos),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn expect(&mut self, b: u8) -> Result<(), FieldPathError> {
        if self.peek() == Some(b) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(format!("expected '{}'", b as char)))
        }
    }

    fn elements(mut self) -> Result<Vec<PathElement>, FieldPathError> {
        if !self.src.starts_with("//") {
            return Err(self.error("path must start with '//'"));
        }
        self.pos = 1;

        let mut elements = Vec::new();
        while self.pos < self.bytes.len() {
            self.expect(b'/')?;
            elements.push(self.element()?);
        }
        if elements.is_empty() {
            return Err(self.error("path has no elements"));
        }
        Ok(elements)
    }

    fn element(&mut self) -> Result<PathElement, FieldPathError> {
        let name = self.name()?;
        let mut attributes: Vec<(String, String)> = Vec::new();
        while self.peek() == Some(b'[') {
            self.pos += 1;
            self.expect(b'@')?;
            let key = self.name()?;
            self.expect(b'=')?;
            let value = self.quoted()?;
            self.expect(b']')?;
            if attributes.iter().any(|(k, _)| *k == key) {
                return Err(self.error(format!("duplicate attribute '{key}'")));
            }
            attributes.push((key, value));
        }
        match self.peek() {
            None | Some(b'/') => Ok(PathElement { name, attributes }),
            Some(_) => Err(self.error("unexpected character after element")),
        }
    }

    fn name(&mut self) -> Result<String, FieldPathError> {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b':' | b'.') {
                self.pos += 1;
            } else {
                break;
            }
        }
        if start == self.pos {
            return Err(self.error("expected a name"));
        }
        Ok(self.src[start..self.pos].to_string())
    }

    fn quoted(&mut self) -> Result<String, FieldPathError> {
        self.expect(b'"')?;
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b == b'"' {
                let value = self.src[start..self.pos].to_string();
                self.pos += 1;
                return Ok(value);
            }
            self.pos += 1;
        }
        Err(self.error("unterminated attribute value"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZONE: &str = r#"//ldml/dates/timeZoneNames/zone[@type="America/New_York"]/exemplarCity"#;

    #[test]
    fn parses_attributes_with_slashes() {
        let path = FieldPath::parse(ZONE).unwrap();
        assert_eq!(path.elements().len(), 5);
        assert_eq!(path.attribute("type"), Some("America/New_York"));
        assert_eq!(path.leaf().name, "exemplarCity");
        assert_eq!(path.distinguishing(), ZONE);
    }

    #[test]
    fn draft_is_not_distinguishing() {
        let a = FieldPath::parse(r#"//ldml/characters/exemplarCharacters[@draft="contributed"]"#)
            .unwrap();
        let b = FieldPath::parse("//ldml/characters/exemplarCharacters").unwrap();
        assert_eq!(a, b);
        assert_ne!(a.full(), b.full());
        assert_eq!(a.distinguishing(), b.distinguishing());
    }

    #[test]
    fn attribute_edits() {
        let p = FieldPath::parse(r#"//ldml/units/unit[@type="length-meter"]/unitPattern[@count="one"]"#)
            .unwrap();
        let other = p.with_attribute("count", "other");
        assert_eq!(other.attribute("count"), Some("other"));
        let bare = p.without_attribute("count");
        assert_eq!(bare.attribute("count"), None);
        assert_eq!(bare.attribute("type"), Some("length-meter"));
    }

    #[test]
    fn prefix_respects_boundaries() {
        let p = FieldPath::parse("//ldml/dates/calendars").unwrap();
        assert!(p.has_prefix("//ldml/dates"));
        assert!(!p.has_prefix("//ldml/dat"));
    }

    #[test]
    fn rejects_malformed() {
        assert!(FieldPath::parse("ldml/x").is_err());
        assert!(FieldPath::parse("//").is_err());
        assert!(FieldPath::parse(r#"//ldml/x[@a="b"#).is_err());
        assert!(FieldPath::parse(r#"//ldml/x[@a="b"][@a="c"]"#).is_err());
        assert!(FieldPath::parse("//ldml//x").is_err());
    }
}
