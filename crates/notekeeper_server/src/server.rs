//! Listener bootstrap for the notes service.

use axum::Router;
use log::info;
use notekeeper_core::ServerConfig;
use notekeeper_http::shutdown_signal;
use tokio::net::TcpListener;

/// Binds `config`'s address and serves `app` until Ctrl-C.
///
/// If the Ctrl-C handler cannot be installed the failure is logged and the
/// server keeps running.
///
/// # Errors
/// - Returns the bind error when the address cannot be resolved or bound.
/// - Returns the accept-loop error when serving fails.
pub async fn serve(config: &ServerConfig, app: Router) -> std::io::Result<()> {
    let listener = TcpListener::bind(config.listen_addr()).await?;
    info!(
        "event=server_listen module=server status=ok addr=http://{} cache_dir={}",
        listener.local_addr()?,
        config.cache_dir.display()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal("server"))
        .await?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}
