//! Graceful-shutdown trigger.
//!
//! # Invariants
//! - Shutdown starts only after a real interrupt.
//! - A failed signal registration is logged and the server keeps serving;
//!   it never turns into an immediate shutdown.

use log::{error, info};
use std::future::Future;

/// Resolves when the process receives Ctrl-C.
pub async fn shutdown_signal(module: &'static str) {
    wait_for_shutdown(module, tokio::signal::ctrl_c()).await;
}

/// Resolves when `signal` reports an interrupt; never resolves if it fails.
pub async fn wait_for_shutdown<F>(module: &'static str, signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("event=shutdown_signal module={module} status=ok"),
        Err(err) => {
            error!(
                "event=shutdown_signal module={module} status=error reason=handler_install_failed error={err}"
            );
            std::future::pending::<()>().await;
        }
    }
}
