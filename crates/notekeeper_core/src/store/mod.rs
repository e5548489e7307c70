//! Note store and its persistence boundary.
//!
//! # Responsibility
//! - Keep the in-memory note collection authoritative.
//! - Isolate file format and write strategy behind `NotePersistence`.
//!
//! # Invariants
//! - Every successful mutation is persisted before it returns.

pub mod note_store;
pub mod persist;
