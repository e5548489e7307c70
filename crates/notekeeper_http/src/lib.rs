//! HTTP plumbing shared by the notes and cache servers.
//!
//! # Responsibility
//! - One access-log middleware so both services log requests identically.
//! - One shutdown future so both services react to Ctrl-C identically.

pub mod request_log;
pub mod shutdown;

pub use request_log::log_requests;
pub use shutdown::{shutdown_signal, wait_for_shutdown};
