//! Core domain logic for Notekeeper.
//! This crate is the single source of truth for note invariants and the
//! startup checks shared by the notes and cache servers.

pub mod config;
pub mod logging;
pub mod model;
pub mod store;

pub use config::{ConfigError, ServerConfig, DEFAULT_NOTES_FILE_NAME};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::note::Note;
pub use store::note_store::{NoteStore, StoreError, StoreResult};
pub use store::persist::{
    AtomicJsonFilePersistence, JsonFilePersistence, MemoryPersistence, NotePersistence,
    PersistenceError, PersistenceResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
