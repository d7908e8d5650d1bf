//! Tracing configuration for test output.

use std::sync::Once;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Initialize tracing for tests.
///
/// Safe to call multiple times; only the first call installs a subscriber.
/// Uses `RUST_LOG` if set, otherwise `info,flow_graphql=debug,flow_autentique=debug`.
pub fn init_test_tracing() {
    init_with(|| {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,flow_graphql=debug,flow_autentique=debug"))
    });
}

/// Initialize tracing with JSON output, one object per event.
///
/// Useful when a test inspects structured fields such as `item_index`.
pub fn init_test_tracing_json() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,flow_graphql=debug,flow_autentique=debug"));
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_test_writer().json())
            .try_init();
    });
}

/// Initialize tracing with a specific filter.
pub fn init_test_tracing_with_filter(filter: &str) {
    init_with(|| EnvFilter::new(filter));
}

/// Initialize silent tracing, for tests that trigger errors on purpose.
pub fn init_test_tracing_silent() {
    init_with(|| EnvFilter::new("off"));
}

fn init_with(filter: impl FnOnce() -> EnvFilter) {
    INIT.call_once(|| {
        // Another harness may have installed a global subscriber already.
        let _ = tracing_subscriber::registry()
            .with(filter())
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .compact(),
            )
            .try_init();
    });
}
