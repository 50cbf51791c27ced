//! Tests for the vetting tracing setup.

use std::sync::Mutex;

use vetting_core::config::LogConfig;
use vetting_core::tracing::setup::{init_tracing, init_tracing_with};

/// Serializes tests that touch `VETTING_LOG`.
static TRACING_MUTEX: Mutex<()> = Mutex::new(());

/// A per-crate filter in VETTING_LOG is accepted.
#[test]
fn test_vetting_log_per_crate() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("VETTING_LOG", "vetting_inheritance=debug,vetting_vote=warn");
    init_tracing();
    std::env::remove_var("VETTING_LOG");
}

/// Repeated initialization is a no-op.
#[test]
fn test_init_tracing_idempotent() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    init_tracing();
    init_tracing();
    init_tracing_with(&LogConfig {
        filter: Some("vetting=debug".into()),
    });
}

/// Garbage in VETTING_LOG falls back to the configured filter.
#[test]
fn test_invalid_filter_falls_back() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("VETTING_LOG", "[[[not a filter");
    init_tracing();
    std::env::remove_var("VETTING_LOG");
}

#[test]
fn test_events_after_init_do_not_panic() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    init_tracing();
    tracing::info!(locale = "de", "tracing smoke test");
    tracing::debug!(epoch = 1u64, "debug event");
}
