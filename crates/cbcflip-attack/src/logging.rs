//! Tracing subscriber configuration for the attack harness.
//!
//! Log levels follow these conventions:
//! - INFO: scenario milestones (session issued, forged token decoded)
//! - DEBUG: offset arithmetic and block/byte positions of the edit

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber.
///
/// The level is controlled via `RUST_LOG` (default `info`); setting
/// `RUST_LOG_FORMAT=json` switches to structured JSON output.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Initialize the tracing subscriber for tests.
///
/// Uses `try_init` to avoid panicking when called more than once.
pub fn init_for_tests() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
