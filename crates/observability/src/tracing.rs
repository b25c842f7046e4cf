//! Tracing/logging initialization.
//!
//! One subscriber per process, installed once at startup. The domain crates
//! emit structured events (the event store logs `event_type` and
//! `occurred_at`, the publisher warns on dropped events); this module decides
//! how those lines come out.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset: storefront domain logging is
/// `info`-level and quiet.
const DEFAULT_FILTER: &str = "info";

/// Initialize tracing/logging for the process.
///
/// JSON lines with timestamps; override the filter with `RUST_LOG` (e.g.
/// `RUST_LOG=storefront_events=debug` to watch the publish flow). Safe to call
/// multiple times — later calls are no-ops.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
