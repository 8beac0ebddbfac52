//! Diagnostic logging setup

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Logs go to stderr so command output on
/// stdout stays clean; `RUST_LOG` overrides the default `warn` level and
/// `--verbose` raises it to `debug`.
pub fn init(verbose: bool) {
    let default_level = if verbose { "rosetint=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second init (e.g. in tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
