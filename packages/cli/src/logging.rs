// ABOUTME: Tracing subscriber setup for the CLI binaries
// ABOUTME: Compact stderr output filtered by RUST_LOG, defaulting to info

use tally_config::constants::DEFAULT_LOG_FILTER;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Logs go to stderr so prompts stay readable.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
