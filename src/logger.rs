//! Logging setup for the CLI.
//!
//! Diagnostics go to stderr through `tracing`, keeping stdout free for JSON
//! and encoded front matter. `RUST_LOG` overrides the default filter unless
//! `--verbose` or `--quiet` is given.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "hugo_matter=warn";
const VERBOSE_FILTER: &str = "hugo_matter=debug";
const QUIET_FILTER: &str = "hugo_matter=error";

/// Pick the filter directive. `verbose` wins over `quiet`.
fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Install the global subscriber. Call once, before any logging.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(!no_color)
        .compact();

    // A second init (e.g. from tests) is not an error worth surfacing.
    let _ = tracing_subscriber::registry()
        .with(filter_for(verbose, quiet))
        .with(fmt_layer)
        .try_init();
}
