//! HTTP surface of the notes service.
//!
//! # Responsibility
//! - Expose the note CRUD routes, upload form and API document over axum.
//! - Map store outcomes to HTTP statuses.
//!
//! # Invariants
//! - Handlers reach the store only through `AppState`.
//! - Every mutation is persisted before its response is sent.

pub mod cli;
pub mod docs;
pub mod error;
pub mod form;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::{app, router};
pub use state::AppState;
