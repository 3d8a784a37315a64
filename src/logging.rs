//! `tracing` subscriber setup shared by the binaries.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Install a stderr subscriber filtered by `RUST_LOG`, falling back to `info`
/// (or `debug` for the crate itself when `verbose`). Safe to call twice.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        format!("{},song_match=debug", DEFAULT_FILTER)
    } else {
        DEFAULT_FILTER.to_string()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
