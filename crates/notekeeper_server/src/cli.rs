//! Command-line arguments for `notekeeper-server`.

use clap::Parser;
use notekeeper_core::{ConfigError, ServerConfig};
use std::path::PathBuf;

/// Notes CRUD service backed by a single JSON document.
#[derive(Debug, Parser)]
#[command(name = "notekeeper-server", version)]
pub struct Args {
    /// Address to listen on, e.g. 127.0.0.1.
    #[arg(short = 'H', long, env = "NOTEKEEPER_HOST")]
    pub host: String,

    /// Port to listen on (1-65535).
    #[arg(short, long, env = "NOTEKEEPER_PORT")]
    pub port: String,

    /// Existing directory holding the notes document.
    #[arg(short, long, env = "NOTEKEEPER_CACHE")]
    pub cache: PathBuf,

    /// Notes document path. Defaults to `<cache>/notes.json`.
    #[arg(long, env = "NOTEKEEPER_NOTES_FILE")]
    pub notes_file: Option<PathBuf>,

    /// Write the notes document through a temp file and rename.
    #[arg(long, env = "NOTEKEEPER_ATOMIC_WRITES")]
    pub atomic_writes: bool,

    /// trace|debug|info|warn|error. Defaults by build mode.
    #[arg(long, env = "NOTEKEEPER_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rotating log files. Logs go to stderr when unset.
    #[arg(long, env = "NOTEKEEPER_LOG_DIR")]
    pub log_dir: Option<String>,
}

impl Args {
    pub fn server_config(&self) -> Result<ServerConfig, ConfigError> {
        ServerConfig::from_args(&self.host, &self.port, &self.cache)
    }

    pub fn notes_path(&self, config: &ServerConfig) -> PathBuf {
        self.notes_file
            .clone()
            .unwrap_or_else(|| config.default_notes_file())
    }
}
