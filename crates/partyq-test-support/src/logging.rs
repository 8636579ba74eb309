//! Test log output.

use tracing_subscriber::EnvFilter;

/// Installs a subscriber that writes through the test harness, filtered by
/// `RUST_LOG` (default `warn`). Safe to call from every test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}
