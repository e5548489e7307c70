//! Static-file service rooted at a cache directory.
//!
//! # Responsibility
//! - Serve files under the configured cache directory at the server root.
//! - Answer `GET /` with a fixed liveness message when the cache directory
//!   has no `index.html`.
//!
//! # Invariants
//! - Static files take precedence: `/` serves `index.html` when it exists.
//! - Requests never resolve outside the cache directory.

use axum::handler::HandlerWithoutStateExt;
use axum::http::{StatusCode, Uri};
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::Router;
use clap::Parser;
use log::info;
use notekeeper_core::{ConfigError, ServerConfig};
use notekeeper_http::{log_requests, shutdown_signal};
use std::path::{Path, PathBuf};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

/// Body of `GET /` when the cache directory has no `index.html`.
pub const ROOT_MESSAGE: &str =
    "Server is running! Static files are served from the cache directory.";

/// Static file server for a cache directory.
#[derive(Debug, Parser)]
#[command(name = "cache-server", version)]
pub struct Args {
    /// Address to listen on, e.g. 127.0.0.1.
    #[arg(short = 'H', long, env = "NOTEKEEPER_HOST")]
    pub host: String,

    /// Port to listen on (1-65535).
    #[arg(short, long, env = "NOTEKEEPER_PORT")]
    pub port: String,

    /// Existing directory whose files are served.
    #[arg(short, long, env = "NOTEKEEPER_CACHE")]
    pub cache: PathBuf,

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
}

/// Builds the router serving `cache_dir`.
///
/// Every request goes to the file service first; only a miss on `/` falls
/// through to `ROOT_MESSAGE`.
pub fn router(cache_dir: &Path) -> Router {
    let files = ServeDir::new(cache_dir).fallback(root_or_not_found.into_service());
    Router::new()
        .fallback_service(files)
        .layer(middleware::from_fn_with_state("cache", log_requests))
}

/// Binds `config`'s address and serves its cache directory until Ctrl-C.
pub async fn serve(config: &ServerConfig) -> std::io::Result<()> {
    let cache_dir = std::fs::canonicalize(&config.cache_dir)?;
    let listener = TcpListener::bind(config.listen_addr()).await?;
    info!(
        "event=server_listen module=cache status=ok addr=http://{} cache_dir={}",
        listener.local_addr()?,
        cache_dir.display()
    );

    axum::serve(listener, router(&cache_dir))
        .with_graceful_shutdown(shutdown_signal("cache"))
        .await
}

async fn root_or_not_found(uri: Uri) -> Response {
    if uri.path() == "/" {
        ROOT_MESSAGE.into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}
