//! Proposed or stored field values.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::constants::INHERITANCE_MARKER;

/// A field value: literal text, or the explicit "inherit" vote.
///
/// Absence is modelled as `Option<Value>::None`, never as a variant.
/// Equality, ordering and hashing all go through the string form, so
/// `Value::Text("↑↑↑")` and `Value::InheritanceMarker` are the same value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Value {
    Text(String),
    InheritanceMarker,
}

impl Value {
    /// Build a value from its string form, recognising the marker spelling.
    pub fn new(s: impl Into<String>) -> Self {
        let s = s.into();
        if s == INHERITANCE_MARKER {
            Self::InheritanceMarker
        } else {
            Self::Text(s)
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(s) => s,
            Self::InheritanceMarker => INHERITANCE_MARKER,
        }
    }

    pub fn is_inheritance_marker(&self) -> bool {
        self.as_str() == INHERITANCE_MARKER
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<Value> for String {
    fn from(v: Value) -> Self {
        match v {
            Value::Text(s) => s,
            Value::InheritanceMarker => INHERITANCE_MARKER.to_string(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
