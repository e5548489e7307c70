//! Upload form page and root redirect.

use axum::response::{Html, Redirect};

pub const UPLOAD_FORM_PATH: &str = "/UploadForm.html";

const UPLOAD_FORM_HTML: &str = include_str!("../static/UploadForm.html");

/// `GET /`
pub async fn index() -> Redirect {
    Redirect::to(UPLOAD_FORM_PATH)
}

/// `GET /UploadForm.html`
pub async fn upload_form() -> Html<&'static str> {
    Html(UPLOAD_FORM_HTML)
}
