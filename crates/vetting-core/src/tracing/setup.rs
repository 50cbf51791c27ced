//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LogConfig;

static INIT: Once = Once::new();

/// Environment variable holding the per-crate filter directives.
pub const LOG_ENV_VAR: &str = "VETTING_LOG";

/// Initialize the vetting tracing/logging system with the default filter.
///
/// Reads `VETTING_LOG` for per-crate log levels.
/// Format: `VETTING_LOG=vetting_inheritance=debug,vetting_vote=info`
///
/// Falls back to `vetting=info` if `VETTING_LOG` is not set or is invalid.
/// Calling it more than once is a no-op.
pub fn init_tracing() {
    init_tracing_with(&LogConfig::default());
}

/// Same as [`init_tracing`], but the fallback filter comes from `log.filter`.
pub fn init_tracing_with(config: &LogConfig) {
    let fallback = config.effective_filter().to_string();
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(&fallback));

        // A host application may already own the global subscriber.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
