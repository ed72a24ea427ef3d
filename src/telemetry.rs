//! Logging setup for the CLI and tests.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `SQLGEN_LOG=sqlgen=debug`.
pub const LOG_ENV: &str = "SQLGEN_LOG";

const DEFAULT_FILTER: &str = "warn";

fn filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("sqlgen=debug,info")
        } else {
            EnvFilter::new(DEFAULT_FILTER)
        }
    })
}

/// Install the global subscriber, writing to stderr so generated output on
/// stdout stays clean. Calling it twice is harmless.
pub fn init_logging(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Subscriber for tests; output is captured per test.
pub fn init_test_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter(false))
            .with_test_writer()
            .try_init();
    });
}
