//! Constructed language display names, e.g. "Chinese (Traditional, Taiwan)".
//!
//! Used when a fallback walk for a language display name finds nothing
//! stored. The name is assembled from already-resolvable pieces: the name of
//! the longest named prefix of the code ("British English" for `en_GB_POSIX`),
//! then the names of the remaining script, region and variant subtags joined
//! with the locale's `localeSeparator` and wrapped in its `localePattern`.

use vetting_core::constants::DISPLAY_NAMES_PREFIX;
use vetting_core::{FieldPath, LocaleId, Value, VettingResult};

const DEFAULT_LOCALE_PATTERN: &str = "{0} ({1})";
const DEFAULT_LOCALE_SEPARATOR: &str = "{0}, {1}";

#[derive(Debug, Clone, Default)]
pub struct DisplayNameConstructor;

impl DisplayNameConstructor {
    pub fn new() -> Self {
        Self
    }

    /// The language code a path names, if it is a constructable display name:
    /// a `languages/language` path whose `type` has script, region or variant
    /// subtags.
    pub fn target(&self, path: &FieldPath) -> Option<LocaleId> {
        let elements = path.elements();
        let [.., parent, leaf] = elements else {
            return None;
        };
        if parent.name != "languages" || leaf.name != "language" {
            return None;
        }
        if !path.distinguishing().starts_with(DISPLAY_NAMES_PREFIX) {
            return None;
        }
        let code = LocaleId::parse(leaf.attribute("type")?).ok()?;
        (code.depth() > 0).then_some(code)
    }

    /// Build the display name for `path`, looking components up through
    /// `lookup`, which must not construct. Returns `None` when the path is
    /// not constructable or no prefix of the code has a name.
    pub fn construct<F>(&self, path: &FieldPath, mut lookup: F) -> VettingResult<Option<String>>
    where
        F: FnMut(&FieldPath) -> VettingResult<Option<Value>>,
    {
        let Some(code) = self.target(path) else {
            return Ok(None);
        };
        let short = path.attribute("alt") == Some("short");

        // The full code has no name of its own, or nothing would be constructed.
        let mut base = code.simple_parent();
        let (base, base_name) = loop {
            let Some(prefix) = base.filter(|prefix| !prefix.is_root()) else {
                return Ok(None);
            };
            if let Some(name) = lookup(&name_path("languages", "language", prefix.as_str(), None)?)? {
                break (prefix, name);
            }
            base = prefix.simple_parent();
        };

        let mut qualifiers: Vec<String> = Vec::new();
        if let Some(script) = code.script().filter(|_| base.script().is_none()) {
            qualifiers.push(component(&mut lookup, "scripts", "script", script, None)?);
        }
        if let Some(region) = code.region().filter(|_| base.region().is_none()) {
            let name = if short {
                lookup(&name_path("territories", "territory", region, Some("short"))?)?
                    .map(|v| v.as_str().to_string())
            } else {
                None
            };
            let name = match name {
                Some(name) => name,
                None => component(&mut lookup, "territories", "territory", region, None)?,
            };
            qualifiers.push(name);
        }
        for variant in code.variants().skip(base.variants().count()) {
            qualifiers.push(component(&mut lookup, "variants", "variant", variant, None)?);
        }

        let separator = pattern(&mut lookup, "localeSeparator", DEFAULT_LOCALE_SEPARATOR)?;
        let wrapper = pattern(&mut lookup, "localePattern", DEFAULT_LOCALE_PATTERN)?;

        let mut joined = String::new();
        for qualifier in qualifiers {
            joined = if joined.is_empty() {
                qualifier
            } else {
                fill(&separator, &joined, &qualifier)
            };
        }
        Ok(Some(fill(&wrapper, base_name.as_str(), &joined)))
    }
}

fn name_path(
    group: &str,
    element: &str,
    code: &str,
    alt: Option<&str>,
) -> VettingResult<FieldPath> {
    let mut raw = format!("{DISPLAY_NAMES_PREFIX}/{group}/{element}[@type=\"{code}\"]");
    if let Some(alt) = alt {
        raw.push_str(&format!("[@alt=\"{alt}\"]"));
    }
    Ok(FieldPath::parse(&raw)?)
}

/// Name of one qualifier; the raw code when nothing names it.
fn component<F>(
    lookup: &mut F,
    group: &str,
    element: &str,
    code: &str,
    alt: Option<&str>,
) -> VettingResult<String>
where
    F: FnMut(&FieldPath) -> VettingResult<Option<Value>>,
{
    let found = lookup(&name_path(group, element, code, alt)?)?;
    Ok(found.map_or_else(|| code.to_string(), |v| v.as_str().to_string()))
}

fn pattern<F>(lookup: &mut F, leaf: &str, default: &str) -> VettingResult<String>
where
    F: FnMut(&FieldPath) -> VettingResult<Option<Value>>,
{
    let path = FieldPath::parse(&format!(
        "{DISPLAY_NAMES_PREFIX}/localeDisplayPattern/{leaf}"
    ))?;
    Ok(lookup(&path)?.map_or_else(|| default.to_string(), |v| v.as_str().to_string()))
}

fn fill(pattern: &str, first: &str, second: &str) -> String {
    pattern.replace("{0}", first).replace("{1}", second)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn table() -> HashMap<String, String> {
        [
            ("languages/language[@type=\"zh\"]", "Chinese"),
            ("languages/language[@type=\"es\"]", "Spanish"),
            ("languages/language[@type=\"en\"]", "English"),
            ("languages/language[@type=\"en_GB\"]", "British English"),
            ("variants/variant[@type=\"POSIX\"]", "Computer"),
            ("scripts/script[@type=\"Hant\"]", "Traditional"),
            ("territories/territory[@type=\"TW\"]", "Taiwan"),
            ("territories/territory[@type=\"US\"]", "United States"),
            ("territories/territory[@type=\"US\"][@alt=\"short\"]", "US"),
        ]
        .into_iter()
        .map(|(k, v)| (format!("{DISPLAY_NAMES_PREFIX}/{k}"), v.to_string()))
        .collect()
    }

    fn build(raw: &str) -> Option<String> {
        let names = table();
        let path = FieldPath::parse(&format!("{DISPLAY_NAMES_PREFIX}/{raw}")).unwrap();
        DisplayNameConstructor::new()
            .construct(&path, |p| Ok(names.get(p.distinguishing()).map(Value::new)))
            .unwrap()
    }

    #[test]
    fn script_and_region() {
        assert_eq!(
            build("languages/language[@type=\"zh_Hant_TW\"]").as_deref(),
            Some("Chinese (Traditional, Taiwan)")
        );
    }

    #[test]
    fn short_region() {
        assert_eq!(
            build("languages/language[@type=\"es_US\"]").as_deref(),
            Some("Spanish (United States)")
        );
        assert_eq!(
            build("languages/language[@type=\"es_US\"][@alt=\"short\"]").as_deref(),
            Some("Spanish (US)")
        );
    }

    #[test]
    fn bare_language_is_not_constructed() {
        assert_eq!(build("languages/language[@type=\"es\"]"), None);
    }

    #[test]
    fn unknown_region_uses_code() {
        assert_eq!(
            build("languages/language[@type=\"es_MX\"]").as_deref(),
            Some("Spanish (MX)")
        );
    }

    #[test]
    fn unnamed_language_is_not_constructed() {
        assert_eq!(build("languages/language[@type=\"xx_MX\"]"), None);
    }

    #[test]
    fn longest_named_prefix_is_the_base() {
        assert_eq!(
            build("languages/language[@type=\"en_GB_POSIX\"]").as_deref(),
            Some("British English (Computer)")
        );
        assert_eq!(
            build("languages/language[@type=\"en_US_POSIX\"]").as_deref(),
            Some("English (United States, Computer)")
        );
    }
}
