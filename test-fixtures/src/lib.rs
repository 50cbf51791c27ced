//! JSON fixtures shared by the workspace's integration tests: a locale
//! hierarchy, a locale data snapshot and ballot scenarios.

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Parent overrides and locale aliases.
pub const HIERARCHY: &str = "locales/hierarchy.json";
/// Locale documents `{ "locale", "values" }`.
pub const SNAPSHOT: &str = "locales/snapshot.json";
/// Ballots with their expected decisions.
pub const SCENARIOS: &str = "ballots/scenarios.json";

/// This crate's directory; fixtures live beside `src/`.
fn fixtures_root() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR"))
}

/// Deserialize a fixture.
///
/// # Panics
/// Panics if the file is missing or does not match `T`.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixture_path(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {e}", path.display()));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {e}", path.display()))
}

pub fn load_fixture_value(relative_path: &str) -> serde_json::Value {
    load_fixture(relative_path)
}

pub fn fixture_exists(relative_path: &str) -> bool {
    fixture_path(relative_path).is_file()
}

pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// JSON files directly under `subdir`, sorted by name.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(fixtures_root().join(subdir)) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| Some(entry.ok()?.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_fixtures_exist() {
        for f in [HIERARCHY, SNAPSHOT, SCENARIOS] {
            assert!(fixture_exists(f), "Missing fixture: {f}");
        }
    }

    #[test]
    fn every_listed_fixture_parses() {
        let files: Vec<PathBuf> = ["locales", "ballots"]
            .into_iter()
            .flat_map(list_fixtures)
            .collect();
        assert_eq!(files.len(), 3, "unexpected fixtures: {files:?}");
        for file in files {
            let content = std::fs::read_to_string(&file).unwrap();
            let _: serde_json::Value = serde_json::from_str(&content)
                .unwrap_or_else(|e| panic!("Failed to parse {}: {e}", file.display()));
        }
    }

    #[test]
    fn missing_directory_lists_nothing() {
        assert!(list_fixtures("nope").is_empty());
    }

    #[test]
    fn snapshot_documents_have_locales() {
        let docs = load_fixture_value(SNAPSHOT);
        for doc in docs.as_array().unwrap() {
            assert!(doc["locale"].is_string());
            assert!(doc["values"].is_object());
        }
    }
}
