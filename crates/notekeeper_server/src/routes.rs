//! Route table for the notes service.

use crate::docs::{openapi_json, swagger_ui, DOCS_PATH, OPENAPI_JSON_PATH};
use crate::form::{index, upload_form, UPLOAD_FORM_PATH};
use crate::handlers::{delete_note, get_note, list_notes, update_note, write_note};
use crate::state::AppState;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use notekeeper_core::NoteStore;
use notekeeper_http::log_requests;

/// Builds the full router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route(UPLOAD_FORM_PATH, get(upload_form))
        .route(DOCS_PATH, get(swagger_ui))
        .route(OPENAPI_JSON_PATH, get(openapi_json))
        .route("/notes", get(list_notes))
        .route(
            "/notes/{name}",
            get(get_note).put(update_note).delete(delete_note),
        )
        .route("/write", post(write_note))
        .layer(middleware::from_fn_with_state("http", log_requests))
        .with_state(state)
}

/// Router owning a freshly loaded store.
pub fn app(store: NoteStore) -> Router {
    router(AppState::new(store))
}
