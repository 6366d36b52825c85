//! Tracing initialization and span definitions.

pub mod spans;

use std::sync::Once;

use organic_core::constants::LOG_ENV_VAR;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("organic=info"))
}

/// Initialize human-readable tracing output.
///
/// Reads `ORGANIC_LOG` for per-target levels, e.g.
/// `ORGANIC_LOG=organic_scheduler=debug,organic_synth=warn`.
/// Falls back to `organic=info`. Idempotent; later calls are no-ops, as are
/// calls after another global subscriber was installed.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter())
            .try_init();
    });
}

/// Initialize JSON-lines tracing output with the same filter rules.
pub fn init_tracing_json() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_thread_ids(true).json())
            .with(filter())
            .try_init();
    });
}
