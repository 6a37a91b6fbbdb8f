//! Contains the trait and implementations for objects that store
//! [finance entries](crate::FinanceEntry).

mod memory;

pub mod sqlite;

pub use memory::InMemoryEntryStore;
pub use sqlite::SQLiteEntryStore;

use crate::{
    Error,
    entry::{EntryId, FinanceEntry},
};

/// Handles the persistence of finance entries, independent of the backend.
///
/// The store is the only place where entry IDs are assigned.
pub trait EntryStore: Send + Sync {
    /// Retrieve every entry, most recent date first.
    ///
    /// Entries that share a date are ordered by descending ID, i.e. the most
    /// recently created entry comes first.
    fn list_entries(&self) -> Result<Vec<FinanceEntry>, Error>;

    /// Retrieve an entry by its `id`, or `None` if no entry has that ID.
    fn get_by_id(&self, id: EntryId) -> Result<Option<FinanceEntry>, Error>;

    /// Save a new entry and return it with its assigned ID.
    ///
    /// Any ID already set on `entry` is ignored.
    fn add(&self, entry: FinanceEntry) -> Result<FinanceEntry, Error>;

    /// Overwrite the stored fields of the entry with the same ID as `entry`.
    ///
    /// # Errors
    /// Returns an [Error::UpdateMissingEntry] if `entry` has no ID or no
    /// stored entry has its ID.
    fn update(&self, entry: &FinanceEntry) -> Result<(), Error>;

    /// Remove the entry with `id`. Returns whether an entry was removed.
    fn delete(&self, id: EntryId) -> Result<bool, Error>;
}
