//! Diagnostic logging
//!
//! User-facing progress goes through [`crate::ui`]; this is for `tracing`
//! diagnostics on stderr. `RUST_LOG` overrides the default filter.

use tracing_subscriber::{EnvFilter, fmt};

pub fn init(verbose: bool) {
    let default = if verbose {
        "asset_build=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A second init (tests) keeps the first subscriber
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
