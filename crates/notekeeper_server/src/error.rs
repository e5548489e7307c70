//! HTTP error mapping for note handlers.
//!
//! # Responsibility
//! - Collapse store failures into the three statuses the API exposes.
//!
//! # Invariants
//! - Bodies are the generic status reason; internal details stay in logs.
//! - Missing form fields and duplicate names are indistinguishable (both 400).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use notekeeper_core::StoreError;

/// Request-scoped failure returned by handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    NotFound,
    BadRequest,
    Internal,
}

impl ApiError {
    pub fn status(self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(_) => Self::NotFound,
            StoreError::DuplicateName(_) => Self::BadRequest,
            StoreError::Persistence(_) => Self::Internal,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let reason = status.canonical_reason().unwrap_or("Error");
        (status, reason).into_response()
    }
}
