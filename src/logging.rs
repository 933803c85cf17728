//! Logger bootstrap for the binary and tests.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Filter used when `RUST_LOG` is unset.
///
/// Verbose runs show the controller's per-action debug output while keeping
/// dependencies at `info`.
#[must_use]
pub fn default_filter(verbose: bool) -> String {
    let crate_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    format!("{}={crate_level},{}", env!("CARGO_CRATE_NAME"), LevelFilter::Info)
        .to_lowercase()
}

/// Initializes the global logger.
///
/// `RUST_LOG` overrides the level chosen by `verbose`.
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(default_filter(verbose));
    let mut builder = Builder::from_env(env);

    // `try_init` only fails if a logger was already set, which happens when
    // several tests initialise logging in one process.
    let _ = builder.format_timestamp_millis().try_init();
}
