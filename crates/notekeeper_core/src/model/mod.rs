//! Domain model for the notes service.
//!
//! # Responsibility
//! - Define canonical data structures used by store and HTTP layers.
//!
//! # Invariants
//! - Every note is identified by its `name`; names never change.

pub mod note;
