//! Shared handler state.
//!
//! # Invariants
//! - One `NoteStore` per process, reachable only through `AppState::store`.
//! - A mutation and its full-file persist complete under one lock, so
//!   concurrent writers inside this process are serialized.

use notekeeper_core::NoteStore;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<NoteStore>>,
}

impl AppState {
    pub fn new(store: NoteStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Locks the store for one request.
    ///
    /// A poisoned lock is recovered: store mutations roll back on failure, so
    /// the guarded data is still consistent.
    pub fn store(&self) -> MutexGuard<'_, NoteStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
