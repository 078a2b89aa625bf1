//! Console logging setup.
//!
//! The scraper logs to stdout only; the log lines are observational, not a
//! machine-readable contract.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Installs a stdout subscriber at `info` level. `RUST_LOG` overrides the
/// default filter.
pub fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))
}
