//! In-memory note store mirrored to a persistence capability.
//!
//! # Responsibility
//! - Own the authoritative ordered sequence of notes.
//! - Push the full snapshot through `NotePersistence` after every mutation.
//!
//! # Invariants
//! - Note names are unique across the store at all times.
//! - `list()` returns notes in insertion order.
//! - A mutation whose `save()` fails is rolled back, so memory never runs
//!   ahead of the persisted snapshot.

use crate::model::note::Note;
use crate::store::persist::{NotePersistence, PersistenceError, PersistenceResult};
use log::{debug, error, info};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type StoreResult<T> = Result<T, StoreError>;

/// Request-scoped store failure.
#[derive(Debug)]
pub enum StoreError {
    /// No note with the given name exists.
    NotFound(String),
    /// `create` collided with an existing name.
    DuplicateName(String),
    /// The mutation was applied but could not be saved; it has been rolled back.
    Persistence(PersistenceError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(name) => write!(f, "note not found: `{name}`"),
            Self::DuplicateName(name) => write!(f, "note already exists: `{name}`"),
            Self::Persistence(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Persistence(err) => Some(err),
            Self::NotFound(_) | Self::DuplicateName(_) => None,
        }
    }
}

impl From<PersistenceError> for StoreError {
    fn from(value: PersistenceError) -> Self {
        Self::Persistence(value)
    }
}

/// Ordered note collection backed by a persistence capability.
pub struct NoteStore {
    notes: Vec<Note>,
    persistence: Box<dyn NotePersistence>,
}

impl NoteStore {
    /// Loads the persisted snapshot, or starts empty when none exists.
    ///
    /// # Errors
    /// - Propagates read/parse failures from the persistence capability.
    /// - Returns `PersistenceError::DuplicateName` when the snapshot violates
    ///   name uniqueness.
    pub fn load(persistence: impl NotePersistence + 'static) -> PersistenceResult<Self> {
        let started_at = Instant::now();
        info!("event=store_load module=store status=start");

        let notes = match persistence.load().and_then(check_unique_names) {
            Ok(notes) => notes,
            Err(err) => {
                error!(
                    "event=store_load module=store status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err);
            }
        };

        info!(
            "event=store_load module=store status=ok notes={} duration_ms={}",
            notes.len(),
            started_at.elapsed().as_millis()
        );
        Ok(Self {
            notes,
            persistence: Box::new(persistence),
        })
    }

    /// Writes the full in-memory sequence through the persistence capability.
    pub fn save(&self) -> PersistenceResult<()> {
        self.persistence.persist(&self.notes)
    }

    /// Returns the note named `name`.
    pub fn find(&self, name: &str) -> StoreResult<&Note> {
        self.notes
            .iter()
            .find(|note| note.name == name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    /// Returns all notes in insertion order.
    pub fn list(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Appends a new note and persists.
    pub fn create(&mut self, name: impl Into<String>, text: impl Into<String>) -> StoreResult<&Note> {
        let name = name.into();
        if self.contains(&name) {
            return Err(StoreError::DuplicateName(name));
        }

        self.notes.push(Note::new(name, text));
        if let Err(err) = self.save_after("create") {
            self.notes.pop();
            return Err(err);
        }

        let index = self.notes.len() - 1;
        Ok(&self.notes[index])
    }

    /// Replaces the text of an existing note and persists.
    pub fn update(&mut self, name: &str, text: impl Into<String>) -> StoreResult<&Note> {
        let index = self
            .position(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;

        let previous = std::mem::replace(&mut self.notes[index].text, text.into());
        if let Err(err) = self.save_after("update") {
            self.notes[index].text = previous;
            return Err(err);
        }

        Ok(&self.notes[index])
    }

    /// Removes an existing note and persists.
    pub fn delete(&mut self, name: &str) -> StoreResult<Note> {
        let index = self
            .position(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;

        let removed = self.notes.remove(index);
        if let Err(err) = self.save_after("delete") {
            self.notes.insert(index, removed);
            return Err(err);
        }

        Ok(removed)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.notes.iter().position(|note| note.name == name)
    }

    fn save_after(&self, op: &str) -> StoreResult<()> {
        let started_at = Instant::now();
        match self.save() {
            Ok(()) => {
                debug!(
                    "event=note_persist module=store status=ok op={} notes={} duration_ms={}",
                    op,
                    self.notes.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=note_persist module=store status=error op={} duration_ms={} error={}",
                    op,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err.into())
            }
        }
    }
}

fn check_unique_names(snapshot: Option<Vec<Note>>) -> PersistenceResult<Vec<Note>> {
    let notes = snapshot.unwrap_or_default();
    let mut seen = HashSet::with_capacity(notes.len());
    for note in &notes {
        if !seen.insert(note.name.as_str()) {
            return Err(PersistenceError::DuplicateName(note.name.clone()));
        }
    }
    Ok(notes)
}
