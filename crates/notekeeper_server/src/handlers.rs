//! Note CRUD request handlers.
//!
//! # Responsibility
//! - Translate method + path + body into one `NoteStore` operation.
//! - Produce the documented status code for every outcome.
//!
//! # Invariants
//! - A handler holds the store lock for its whole operation and never
//!   awaits while holding it.
//! - `POST /write` requires non-empty `note_name` and `note`.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Form, Json};
use log::{debug, info};
use notekeeper_core::Note;
use serde::Deserialize;
use utoipa::ToSchema;

/// Body returned by a successful `POST /write`.
pub const CREATED_BODY: &str = "Note created";

/// Form fields posted by the upload form.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct WriteForm {
    /// Name of the new note; must not be taken.
    #[schema(example = "groceries")]
    pub note_name: Option<String>,
    /// Initial text.
    #[schema(example = "milk, eggs")]
    pub note: Option<String>,
}

impl WriteForm {
    /// Returns `(name, text)` when both fields are present and non-empty.
    fn into_parts(self) -> Option<(String, String)> {
        let name = self.note_name.filter(|value| !value.is_empty())?;
        let text = self.note.filter(|value| !value.is_empty())?;
        Some((name, text))
    }
}

/// `GET /notes/{name}`: plain-text note body.
#[utoipa::path(
    get,
    path = "/notes/{name}",
    tag = "notes",
    params(("name" = String, Path, description = "Note name")),
    responses(
        (status = 200, description = "Note text", body = String, content_type = "text/plain"),
        (status = 404, description = "Note not found")
    )
)]
pub async fn get_note(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<String, ApiError> {
    let text = state.store().find(&name)?.text.clone();
    Ok(text)
}

/// `PUT /notes/{name}`: replaces the text with the raw request body.
#[utoipa::path(
    put,
    path = "/notes/{name}",
    tag = "notes",
    params(("name" = String, Path, description = "Note name")),
    request_body(content = String, description = "New note text", content_type = "text/plain"),
    responses(
        (status = 200, description = "Updated note", body = Note),
        (status = 404, description = "Note not found"),
        (status = 500, description = "Notes file could not be written")
    )
)]
pub async fn update_note(
    State(state): State<AppState>,
    Path(name): Path<String>,
    text: String,
) -> Result<Json<Note>, ApiError> {
    let mut store = state.store();
    let note = store.update(&name, text)?.clone();
    debug!("event=note_update module=http status=ok chars={}", note.text.chars().count());
    Ok(Json(note))
}

/// `DELETE /notes/{name}`
#[utoipa::path(
    delete,
    path = "/notes/{name}",
    tag = "notes",
    params(("name" = String, Path, description = "Note name")),
    responses(
        (status = 204, description = "Note deleted"),
        (status = 404, description = "Note not found"),
        (status = 500, description = "Notes file could not be written")
    )
)]
pub async fn delete_note(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.store().delete(&name)?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /notes`: every note in insertion order.
#[utoipa::path(
    get,
    path = "/notes",
    tag = "notes",
    responses((status = 200, description = "Every note in insertion order", body = [Note]))
)]
pub async fn list_notes(State(state): State<AppState>) -> Json<Vec<Note>> {
    let notes = state.store().list().to_vec();
    Json(notes)
}

/// `POST /write`: creates a note from a form-encoded body.
#[utoipa::path(
    post,
    path = "/write",
    tag = "notes",
    request_body(content = WriteForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Note created", body = String, content_type = "text/plain"),
        (status = 400, description = "Missing field or name already taken"),
        (status = 500, description = "Notes file could not be written")
    )
)]
pub async fn write_note(
    State(state): State<AppState>,
    form: Result<Form<WriteForm>, FormRejection>,
) -> Result<(StatusCode, &'static str), ApiError> {
    let Form(form) = form.map_err(|rejection| {
        debug!(
            "event=note_write module=http status=error reason=form_rejected detail={}",
            rejection.body_text()
        );
        ApiError::BadRequest
    })?;
    let (name, text) = form.into_parts().ok_or(ApiError::BadRequest)?;

    let mut store = state.store();
    store.create(name, text)?;
    info!("event=note_write module=http status=ok notes={}", store.len());
    Ok((StatusCode::CREATED, CREATED_BODY))
}
