//! Logging bootstrap.
//!
//! The library itself only emits `tracing` events (the inverse search
//! traces convergence and warns on ceiling hits); installing a subscriber
//! is left to the embedding binary. The CLI calls [`init_logging`] once
//! at startup.

use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber.
///
/// The filter defaults to `warn` (or `debug` with `verbose`) and can be
/// overridden through `RUST_LOG`. Calling this twice is harmless; the
/// second call leaves the existing subscriber in place.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
