//! Generated API documentation.
//!
//! # Responsibility
//! - Collect the `#[utoipa::path]` annotations of the note handlers into one
//!   OpenAPI document served at `/docs/openapi.json`.
//! - Serve a Swagger UI page at `/docs` that renders that document.
//!
//! # Invariants
//! - The document is derived from the handlers, so a route added without an
//!   annotation is missing from `/docs` rather than described wrongly.

use crate::error::ApiError;
use crate::handlers::{self, WriteForm};
use askama::Template;
use axum::response::Html;
use axum::Json;
use log::error;
use notekeeper_core::Note;
use utoipa::OpenApi;

/// Route of the Swagger UI page.
pub const DOCS_PATH: &str = "/docs";
/// Route of the generated OpenAPI document.
pub const OPENAPI_JSON_PATH: &str = "/docs/openapi.json";

/// OpenAPI description of the note routes.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Notekeeper API",
        description = "Named text notes persisted as one JSON document."
    ),
    paths(
        handlers::list_notes,
        handlers::get_note,
        handlers::update_note,
        handlers::delete_note,
        handlers::write_note
    ),
    components(schemas(Note, WriteForm)),
    tags((name = "notes", description = "Note CRUD"))
)]
pub struct ApiDoc;

#[derive(Template)]
#[template(path = "swagger_ui.html")]
struct SwaggerUiTemplate<'a> {
    title: &'a str,
    spec_url: &'a str,
}

/// Renders the Swagger UI page pointing at `OPENAPI_JSON_PATH`.
pub fn render_swagger_ui() -> Result<String, askama::Error> {
    let doc = ApiDoc::openapi();
    SwaggerUiTemplate {
        title: &doc.info.title,
        spec_url: OPENAPI_JSON_PATH,
    }
    .render()
}

/// `GET /docs`
pub async fn swagger_ui() -> Result<Html<String>, ApiError> {
    render_swagger_ui().map(Html).map_err(|err| {
        error!("event=docs_render module=http status=error error={err}");
        ApiError::Internal
    })
}

/// `GET /docs/openapi.json`
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
