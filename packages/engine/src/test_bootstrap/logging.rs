#![cfg(test)]

//! Test logging initialization for the engine's unit tests.
//!
//! Installs a `tracing` subscriber once per test binary so rejected moves and
//! phase transitions show up when a test fails. Integration tests use the
//! `test-support` crate, which applies the same policy.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Initialize structured logging for tests.
///
/// Idempotent. The level is read from `TEST_LOG`, then `RUST_LOG`, and
/// defaults to `"warn"`.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}
