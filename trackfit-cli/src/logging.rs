//! Log subscriber setup shared by the binaries.

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbose` selects `debug` and the
/// configured level applies.
pub fn init(verbose: bool, configured_level: &str) {
    let fallback = if verbose { "debug" } else { configured_level };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
