//! Logging setup for the binary
//!
//! The library only emits `tracing` events; installing a subscriber is left to
//! whoever embeds it.

use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding the log filter, e.g. `minibit=debug`
pub const LOG_ENV: &str = "MINIBIT_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Install a compact stderr subscriber filtered by `MINIBIT_LOG`, then `RUST_LOG`
///
/// Logs go to stderr so stdout carries only command output.
pub fn init_tracing() -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .finish()
        .try_init()
}
