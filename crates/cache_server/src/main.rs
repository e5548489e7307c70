//! `cache-server` entry point.
//!
//! # Responsibility
//! - Validate host, port and cache directory before binding.
//! - Exit non-zero with a diagnostic when any of them is unusable.

use anyhow::{anyhow, Context, Result};
use cache_server::Args;
use clap::Parser;
use log::error;
use notekeeper_core::{default_log_level, init_logging, LogTarget};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let target = LogTarget::from_option(args.log_dir.as_deref()).map_err(|err| anyhow!(err))?;
    let level = args.log_level.as_deref().unwrap_or(default_log_level());
    init_logging("cache-server", level, target).map_err(|err| anyhow!(err))?;

    let config = args.server_config().map_err(|err| {
        error!("event=config_check module=cache status=error error={err}");
        err
    })?;

    cache_server::serve(&config)
        .await
        .with_context(|| format!("failed to serve on {}", config.listen_addr()))
}
