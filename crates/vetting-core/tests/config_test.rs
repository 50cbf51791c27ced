//! Tests for layered configuration.

use std::sync::Mutex;

use vetting_core::config::VettingConfig;
use vetting_core::errors::ConfigError;

/// Serializes tests that touch `VETTING_*` env vars.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const ENV_VARS: &[&str] = &[
    "VETTING_MAX_CHAIN_DEPTH",
    "VETTING_CACHE_CAPACITY",
    "VETTING_CACHE_ENABLED",
    "VETTING_TRANSCRIPT",
    "VETTING_APPROVED_BAR",
];

fn clear_env() {
    for var in ENV_VARS {
        std::env::remove_var(var);
    }
}

#[test]
fn test_defaults() {
    let config = VettingConfig::default();
    assert_eq!(config.inheritance.effective_max_chain_depth(), 64);
    assert_eq!(config.inheritance.effective_cache_capacity(), 100_000);
    assert!(config.inheritance.effective_cache_enabled());
    assert!(!config.voting.effective_transcript());
    assert_eq!(config.voting.effective_approved_bar(), 8);
    assert!(!config.voting.effective_established_by_default());
    assert_eq!(config.log.effective_filter(), "vetting=info");
}

#[test]
fn test_from_toml() {
    let config = VettingConfig::from_toml(
        r#"
        [inheritance]
        max_chain_depth = 12

        [voting]
        transcript = true
        established_locales = ["de", "fr"]

        [log]
        filter = "vetting_vote=debug"
        "#,
    )
    .unwrap();
    assert_eq!(config.inheritance.effective_max_chain_depth(), 12);
    assert_eq!(config.inheritance.effective_cache_capacity(), 100_000);
    assert!(config.voting.effective_transcript());
    assert_eq!(config.voting.established_locales, vec!["de", "fr"]);
    assert_eq!(config.log.effective_filter(), "vetting_vote=debug");
}

#[test]
fn test_from_toml_rejects_bad_types() {
    let err = VettingConfig::from_toml("[voting]\ntranscript = \"yes please\"").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_load_without_file_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let config = VettingConfig::load(dir.path()).unwrap();
    assert_eq!(config.voting.effective_approved_bar(), 8);
}

#[test]
fn test_load_project_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("vetting.toml"),
        "[voting]\ndefault_approved_bar = 20\n[inheritance]\ncache_enabled = false\n",
    )
    .unwrap();

    let config = VettingConfig::load(dir.path()).unwrap();
    assert_eq!(config.voting.effective_approved_bar(), 20);
    assert!(!config.inheritance.effective_cache_enabled());
}

#[test]
fn test_env_overrides_project_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("vetting.toml"),
        "[voting]\ndefault_approved_bar = 20\ntranscript = false\n",
    )
    .unwrap();

    std::env::set_var("VETTING_APPROVED_BAR", "12");
    std::env::set_var("VETTING_TRANSCRIPT", "true");
    std::env::set_var("VETTING_MAX_CHAIN_DEPTH", "not-a-number");
    let config = VettingConfig::load(dir.path());
    clear_env();

    let config = config.unwrap();
    assert_eq!(config.voting.effective_approved_bar(), 12);
    assert!(config.voting.effective_transcript());
    // Unparseable env values are ignored.
    assert_eq!(config.inheritance.effective_max_chain_depth(), 64);
}

#[test]
fn test_invalid_project_file_is_parse_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("vetting.toml"), "[voting\n").unwrap();

    let err = VettingConfig::load(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_validate_rejects_zero() {
    for toml in [
        "[inheritance]\nmax_chain_depth = 0",
        "[inheritance]\ncache_capacity = 0",
        "[voting]\ndefault_approved_bar = 0",
    ] {
        let config = VettingConfig::from_toml(toml).unwrap();
        let err = VettingConfig::validate(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationFailed { .. }), "{toml}");
    }
}

#[test]
fn test_to_toml_round_trips_overrides() {
    let config = VettingConfig::from_toml("[voting]\ndefault_approved_bar = 16").unwrap();
    let text = config.to_toml().unwrap();
    let back = VettingConfig::from_toml(&text).unwrap();
    assert_eq!(back.voting.effective_approved_bar(), 16);
}
