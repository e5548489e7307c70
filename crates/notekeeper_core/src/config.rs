//! Startup configuration validation shared by both servers.
//!
//! # Responsibility
//! - Turn raw host/port/cache-directory arguments into a checked config.
//! - Report every rejected argument as a `ConfigError` before any socket is bound.
//!
//! # Invariants
//! - `port` is always within `1..=65535`.
//! - `cache_dir` existed and was a directory at validation time.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// File name of the notes document inside the cache directory.
pub const DEFAULT_NOTES_FILE_NAME: &str = "notes.json";

/// Fatal startup argument error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    MissingHost,
    InvalidPort(String),
    MissingCacheDir(PathBuf),
    NotADirectory(PathBuf),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingHost => write!(f, "--host must not be empty"),
            Self::InvalidPort(raw) => {
                write!(f, "--port must be a number from 1 to 65535, got `{raw}`")
            }
            Self::MissingCacheDir(path) => {
                write!(f, "cache directory `{}` does not exist", path.display())
            }
            Self::NotADirectory(path) => {
                write!(f, "cache path `{}` is not a directory", path.display())
            }
        }
    }
}

impl Error for ConfigError {}

/// Validated listen address and cache directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cache_dir: PathBuf,
}

impl ServerConfig {
    /// Validates raw command-line values.
    ///
    /// # Errors
    /// - `MissingHost` when `host` is blank.
    /// - `InvalidPort` when `port` is not an integer in `1..=65535`.
    /// - `MissingCacheDir` / `NotADirectory` when `cache_dir` is unusable.
    pub fn from_args(
        host: &str,
        port: &str,
        cache_dir: impl AsRef<Path>,
    ) -> Result<Self, ConfigError> {
        let host = host.trim();
        if host.is_empty() {
            return Err(ConfigError::MissingHost);
        }

        let port = parse_port(port)?;

        let cache_dir = cache_dir.as_ref();
        let metadata = std::fs::metadata(cache_dir)
            .map_err(|_| ConfigError::MissingCacheDir(cache_dir.to_path_buf()))?;
        if !metadata.is_dir() {
            return Err(ConfigError::NotADirectory(cache_dir.to_path_buf()));
        }

        Ok(Self {
            host: host.to_string(),
            port,
            cache_dir: cache_dir.to_path_buf(),
        })
    }

    /// `host:port` string suitable for socket address resolution.
    pub fn listen_addr(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// Default location of the notes document.
    pub fn default_notes_file(&self) -> PathBuf {
        self.cache_dir.join(DEFAULT_NOTES_FILE_NAME)
    }
}

/// Parses the whole trimmed string as a decimal port; `8080abc` is rejected.
fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    match raw.trim().parse::<u32>() {
        Ok(value) if (1..=65535).contains(&value) => Ok(value as u16),
        _ => Err(ConfigError::InvalidPort(raw.to_string())),
    }
}
