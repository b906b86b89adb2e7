//! Console logging for the command-line tool

use tracing_subscriber::EnvFilter;

/// Install a `fmt` subscriber writing to stderr
///
/// `RUST_LOG` takes precedence over `default_filter`. An invalid filter string
/// falls back to `warn`. Calling this when a global subscriber is already set is
/// a no-op.
pub fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    if result.is_err() {
        tracing::debug!("global tracing subscriber already initialized");
    }
}
