//! Logging init: stderr subscriber gated by RUST_LOG.

use tracing_subscriber::EnvFilter;

/// Initialize diagnostic logging to stderr. Progress output stays on stdout;
/// set `RUST_LOG=blazorgrab=debug` for request-level detail.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
