//! Persistence capability for the note store.
//!
//! # Responsibility
//! - Define the `load`/`persist(snapshot)` boundary between the in-memory
//!   store and durable state.
//! - Provide whole-file JSON strategies plus an in-memory strategy for tests.
//!
//! # Invariants
//! - `persist` always receives the full snapshot and replaces the previous
//!   persisted state entirely.
//! - An absent document loads as `None`; a present but unreadable or
//!   malformed document is an error, never an empty store.
//! - The document is a pretty-printed JSON array of `{ name, text }`.

use crate::model::note::Note;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tempfile::NamedTempFile;

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Failure at the load/save boundary.
#[derive(Debug)]
pub enum PersistenceError {
    /// Reading or writing the document failed.
    Io { path: PathBuf, source: std::io::Error },
    /// The document exists but is not a JSON array of notes.
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The snapshot could not be encoded as JSON.
    Encode(serde_json::Error),
    /// The document lists the same note name more than once.
    DuplicateName(String),
    /// `MemoryPersistence` was told to fail writes.
    Rejected,
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "notes file `{}` i/o failed: {source}", path.display())
            }
            Self::Malformed { path, source } => {
                write!(f, "notes file `{}` is malformed: {source}", path.display())
            }
            Self::Encode(source) => write!(f, "failed to encode notes: {source}"),
            Self::DuplicateName(name) => {
                write!(f, "persisted notes contain duplicate name `{name}`")
            }
            Self::Rejected => write!(f, "persistence rejected the snapshot"),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Malformed { source, .. } => Some(source),
            Self::Encode(source) => Some(source),
            Self::DuplicateName(_) | Self::Rejected => None,
        }
    }
}

/// Load/save boundary used by `NoteStore`.
///
/// Implementations may choose any write strategy as long as a successful
/// `persist` followed by `load` returns the same snapshot.
pub trait NotePersistence: Send {
    /// Returns the persisted snapshot, or `None` when nothing was persisted yet.
    fn load(&self) -> PersistenceResult<Option<Vec<Note>>>;
    /// Replaces the persisted state with `notes`.
    fn persist(&self, notes: &[Note]) -> PersistenceResult<()>;
}

/// Whole-file overwrite strategy.
///
/// The document is rewritten in place with a single `write` call. There is
/// no partial-write protection: a crash or disk-full error mid-write can
/// leave a truncated document that will fail the next `load`. Use
/// `AtomicJsonFilePersistence` when that matters.
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl NotePersistence for JsonFilePersistence {
    fn load(&self) -> PersistenceResult<Option<Vec<Note>>> {
        read_notes_file(&self.path)
    }

    fn persist(&self, notes: &[Note]) -> PersistenceResult<()> {
        let bytes = encode_notes(notes)?;
        std::fs::write(&self.path, bytes).map_err(|source| PersistenceError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// Temp-file-then-rename strategy.
///
/// The snapshot is written and synced to a sibling temp file, which then
/// replaces the document with one rename. Readers observe either the old or
/// the new document, never a partial one.
#[derive(Debug, Clone)]
pub struct AtomicJsonFilePersistence {
    path: PathBuf,
}

impl AtomicJsonFilePersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl NotePersistence for AtomicJsonFilePersistence {
    fn load(&self) -> PersistenceResult<Option<Vec<Note>>> {
        read_notes_file(&self.path)
    }

    fn persist(&self, notes: &[Note]) -> PersistenceResult<()> {
        let parent = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        let mut staged = NamedTempFile::new_in(parent).map_err(|err| self.io_error(err))?;
        staged
            .write_all(&encode_notes(notes)?)
            .map_err(|err| self.io_error(err))?;
        staged
            .as_file()
            .sync_all()
            .map_err(|err| self.io_error(err))?;
        staged
            .persist(&self.path)
            .map_err(|err| self.io_error(err.error))?;
        Ok(())
    }
}

/// In-memory strategy; clones share the same snapshot.
///
/// Write failures can only be injected with the `test-util` feature.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    snapshot: Arc<Mutex<Option<Vec<Note>>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with an already persisted snapshot.
    pub fn with_notes(notes: Vec<Note>) -> Self {
        let persistence = Self::default();
        *persistence
            .snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(notes);
        persistence
    }

    /// Returns the last persisted snapshot.
    pub fn snapshot(&self) -> Option<Vec<Note>> {
        self.snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Makes subsequent `persist` calls fail with `PersistenceError::Rejected`.
    #[cfg(any(test, feature = "test-util"))]
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl NotePersistence for MemoryPersistence {
    fn load(&self) -> PersistenceResult<Option<Vec<Note>>> {
        Ok(self.snapshot())
    }

    fn persist(&self, notes: &[Note]) -> PersistenceResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PersistenceError::Rejected);
        }
        *self
            .snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(notes.to_vec());
        Ok(())
    }
}

fn read_notes_file(path: &Path) -> PersistenceResult<Option<Vec<Note>>> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(PersistenceError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_slice::<Vec<Note>>(&bytes)
        .map(Some)
        .map_err(|source| PersistenceError::Malformed {
            path: path.to_path_buf(),
            source,
        })
}

fn encode_notes(notes: &[Note]) -> PersistenceResult<Vec<u8>> {
    serde_json::to_vec_pretty(notes).map_err(PersistenceError::Encode)
}
