//! Implements a struct that holds the state of the REST server.

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    entry::EntryService,
    stores::{EntryStore, InMemoryEntryStore},
};

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState {
    /// Runs the finance entry use cases.
    pub entry_service: EntryService,
}

impl AppState {
    /// Create a new [AppState] that persists entries with `entry_store`.
    pub fn new(entry_store: Arc<dyn EntryStore>) -> Self {
        Self {
            entry_service: EntryService::new(entry_store),
        }
    }

    /// Create a new [AppState] that keeps entries in memory only.
    ///
    /// Entries are lost when the server stops.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryEntryStore::new()))
    }
}

impl FromRef<AppState> for EntryService {
    fn from_ref(state: &AppState) -> Self {
        state.entry_service.clone()
    }
}
