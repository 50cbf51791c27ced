//! Immutable locale data snapshots.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use vetting_core::{FieldPath, LocaleId, Value, VettingResult};

/// One locale's stored values, as loaded from JSON:
/// `{ "locale": "de_AT", "values": { "<full path>": "<value>" } }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleDocument {
    pub locale: LocaleId,
    #[serde(default)]
    pub values: BTreeMap<FieldPath, Value>,
}

/// All stored values across locales, keyed by distinguishing path.
///
/// A snapshot is never mutated after construction; reloads swap in a new one.
#[derive(Debug, Clone, Default)]
pub struct LocaleData {
    locales: FxHashMap<LocaleId, FxHashMap<FieldPath, (FieldPath, Value)>>,
}

impl LocaleData {
    pub fn builder() -> LocaleDataBuilder {
        LocaleDataBuilder::default()
    }

    pub fn from_documents(documents: impl IntoIterator<Item = LocaleDocument>) -> Self {
        let mut builder = Self::builder();
        for document in documents {
            builder.add_document(document);
        }
        builder.build()
    }

    /// The value `locale` itself stores for `path`, marker included.
    pub fn get(&self, locale: &LocaleId, path: &FieldPath) -> Option<&Value> {
        self.locales
            .get(locale)?
            .get(path)
            .map(|(_, value)| value)
    }

    /// Full form of the stored path, with its non-distinguishing attributes.
    pub fn full_path(&self, locale: &LocaleId, path: &FieldPath) -> Option<&FieldPath> {
        self.locales
            .get(locale)?
            .get(path)
            .map(|(full, _)| full)
    }

    pub fn contains_locale(&self, locale: &LocaleId) -> bool {
        self.locales.contains_key(locale)
    }

    pub fn locales(&self) -> impl Iterator<Item = &LocaleId> {
        self.locales.keys()
    }

    /// Total stored values across all locales.
    pub fn len(&self) -> usize {
        self.locales.values().map(FxHashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Default)]
pub struct LocaleDataBuilder {
    data: LocaleData,
}

impl LocaleDataBuilder {
    /// Store a value; a later insert for the same slot replaces it.
    pub fn insert(&mut self, locale: LocaleId, path: FieldPath, value: Value) -> &mut Self {
        self.data
            .locales
            .entry(locale)
            .or_default()
            .insert(path.clone(), (path, value));
        self
    }

    /// Parse and store, for callers holding raw strings.
    pub fn insert_raw(&mut self, locale: &str, path: &str, value: &str) -> VettingResult<&mut Self> {
        let locale = LocaleId::parse(locale)?;
        let path = FieldPath::parse(path)?;
        Ok(self.insert(locale, path, Value::new(value)))
    }

    pub fn add_document(&mut self, document: LocaleDocument) -> &mut Self {
        let locale = document.locale;
        // Keep the locale present even when it stores nothing.
        self.data.locales.entry(locale.clone()).or_default();
        for (path, value) in document.values {
            self.insert(locale.clone(), path, value);
        }
        self
    }

    pub fn build(self) -> LocaleData {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_by_distinguishing_path() {
        let mut builder = LocaleData::builder();
        builder
            .insert_raw(
                "de",
                r#"//ldml/localeDisplayNames/languages/language[@type="fr"][@draft="contributed"]"#,
                "Französisch",
            )
            .unwrap();
        let data = builder.build();

        let de = LocaleId::parse("de").unwrap();
        let bare = FieldPath::parse(r#"//ldml/localeDisplayNames/languages/language[@type="fr"]"#)
            .unwrap();
        assert_eq!(data.get(&de, &bare), Some(&Value::new("Französisch")));
        assert_eq!(
            data.full_path(&de, &bare).unwrap().attribute("draft"),
            Some("contributed")
        );
        assert_eq!(data.len(), 1);
    }

    #[test]
    fn empty_documents_still_register_their_locale() {
        let docs: Vec<LocaleDocument> = serde_json::from_str(
            r#"[
                {"locale": "fr", "values": {}},
                {"locale": "de", "values": {"//ldml/characters/exemplarCharacters": "[a-z]"}}
            ]"#,
        )
        .unwrap();
        let data = LocaleData::from_documents(docs);

        assert!(data.contains_locale(&LocaleId::parse("fr").unwrap()));
        assert!(!data.contains_locale(&LocaleId::parse("it").unwrap()));
        let mut locales: Vec<&str> = data.locales().map(LocaleId::as_str).collect();
        locales.sort_unstable();
        assert_eq!(locales, ["de", "fr"]);
        assert_eq!(data.len(), 1);
    }
}
