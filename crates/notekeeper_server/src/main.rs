//! `notekeeper-server` entry point.
//!
//! # Responsibility
//! - Validate arguments, load the store, then serve until interrupted.
//! - Exit non-zero with a diagnostic on any startup failure.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::error;
use notekeeper_core::{
    default_log_level, init_logging, AtomicJsonFilePersistence, JsonFilePersistence, LogTarget,
    NoteStore,
};
use notekeeper_server::cli::Args;
use notekeeper_server::{app, server};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let target = LogTarget::from_option(args.log_dir.as_deref()).map_err(|err| anyhow!(err))?;
    let level = args.log_level.as_deref().unwrap_or(default_log_level());
    init_logging("notekeeper-server", level, target).map_err(|err| anyhow!(err))?;

    let config = args.server_config().map_err(|err| {
        error!("event=config_check module=server status=error error={err}");
        err
    })?;

    let notes_path = args.notes_path(&config);
    let store = if args.atomic_writes {
        NoteStore::load(AtomicJsonFilePersistence::new(&notes_path))
    } else {
        NoteStore::load(JsonFilePersistence::new(&notes_path))
    }
    .with_context(|| format!("failed to load notes from `{}`", notes_path.display()))?;

    server::serve(&config, app(store))
        .await
        .with_context(|| format!("failed to serve on {}", config.listen_addr()))
}
