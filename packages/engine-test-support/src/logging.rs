//! Test logging bootstrap.
//!
//! Level precedence: `TEST_LOG`, then `RUST_LOG`, then `warn`. Set
//! `TEST_LOG_FORMAT=json` to get the same JSON lines the engine emits in
//! production.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Install a test-writer subscriber once per process. Never panics.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        let json = std::env::var("TEST_LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
        let builder = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time();

        // Another harness may already own the global subscriber.
        let _ = if json {
            builder.json().try_init()
        } else {
            builder.try_init()
        };
        tracing::debug!("test logging initialized");
    });
}
