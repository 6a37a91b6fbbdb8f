//! The application service for finance entries.

use std::sync::Arc;

use crate::{
    Error,
    entry::{EntryFields, EntryId, FinanceEntry},
    stores::EntryStore,
};

/// Runs the finance entry use cases against an [EntryStore].
///
/// The store is chosen when the service is created, e.g. SQLite for the
/// server and an in-memory store for tests. Cloning the service is cheap and
/// clones share the same store.
#[derive(Clone)]
pub struct EntryService {
    store: Arc<dyn EntryStore>,
}

impl EntryService {
    /// Create a service backed by `store`.
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        Self { store }
    }

    /// Get every entry, most recent first.
    pub fn list(&self) -> Result<Vec<FinanceEntry>, Error> {
        self.store.list_entries()
    }

    /// Get a single entry.
    ///
    /// # Errors
    /// Returns an [Error::NotFound] if no entry has the ID `id`.
    pub fn get(&self, id: EntryId) -> Result<FinanceEntry, Error> {
        self.store.get_by_id(id)?.ok_or(Error::NotFound)
    }

    /// Validate `fields` and save them as a new entry.
    ///
    /// Nothing is saved if any field is missing or invalid.
    pub fn create(&self, fields: EntryFields) -> Result<FinanceEntry, Error> {
        let entry = FinanceEntry::from_fields(fields)?;
        let entry = self.store.add(entry)?;

        tracing::debug!("Created finance entry {:?}", entry.id());

        Ok(entry)
    }

    /// Overwrite the supplied `fields` of the entry with the ID `id`.
    ///
    /// Fields that are not supplied are left as they are and are not
    /// validated again. Supplying no fields rewrites the entry unchanged.
    ///
    /// # Errors
    /// Returns an [Error::NotFound] if no entry has the ID `id`, or the
    /// validation error of the first invalid field.
    pub fn update(&self, id: EntryId, fields: EntryFields) -> Result<FinanceEntry, Error> {
        let mut entry = self.get(id)?;

        entry.apply(fields)?;
        self.store.update(&entry)?;

        tracing::debug!("Updated finance entry {id}");

        Ok(entry)
    }

    /// Delete the entry with the ID `id`. Returns whether an entry was deleted.
    pub fn delete(&self, id: EntryId) -> Result<bool, Error> {
        let deleted = self.store.delete(id)?;

        if deleted {
            tracing::debug!("Deleted finance entry {id}");
        }

        Ok(deleted)
    }
}

/// The sum of the amounts of `entries`.
pub fn running_total(entries: &[FinanceEntry]) -> f64 {
    entries.iter().map(|entry| entry.amount().value()).sum()
}
