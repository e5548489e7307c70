//! Per-request access logging middleware.
//!
//! # Invariants
//! - Exactly one `http_request` event per request, emitted after the
//!   response is built.
//! - 5xx responses log at `warn` with `status=error`; everything else logs
//!   at `info` with `status=ok`.

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use log::{info, warn, Level};
use notekeeper_core::logging::sanitize_message;
use std::time::Instant;

const MAX_LOGGED_PATH_CHARS: usize = 200;

/// Access-log middleware; the state is the `module=` label of the service.
///
/// Install with `middleware::from_fn_with_state("notes", log_requests)`.
pub async fn log_requests(
    State(module): State<&'static str>,
    request: Request,
    next: Next,
) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = sanitize_message(request.uri().path(), MAX_LOGGED_PATH_CHARS);

    let response = next.run(request).await;

    let http_status = response.status();
    let (level, status) = outcome(http_status);
    let line = format!(
        "event=http_request module={module} status={status} method={method} path={path} http_status={} duration_ms={}",
        http_status.as_u16(),
        started_at.elapsed().as_millis()
    );
    if level == Level::Warn {
        warn!("{line}");
    } else {
        info!("{line}");
    }
    response
}

fn outcome(http_status: StatusCode) -> (Level, &'static str) {
    if http_status.is_server_error() {
        (Level::Warn, "error")
    } else {
        (Level::Info, "ok")
    }
}
