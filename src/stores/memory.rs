//! Implements a finance entry store that keeps entries in memory.

use std::{
    collections::BTreeMap,
    sync::{Mutex, MutexGuard},
};

use crate::{
    Error,
    entry::{EntryId, FinanceEntry},
    stores::EntryStore,
};

/// Keeps finance entries in memory. Entries are lost when the store is dropped.
///
/// IDs start at 1 and are never reused, matching [SQLiteEntryStore](crate::SQLiteEntryStore).
#[derive(Debug, Default)]
pub struct InMemoryEntryStore {
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    last_id: EntryId,
    entries: BTreeMap<EntryId, FinanceEntry>,
}

impl InMemoryEntryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, Error> {
        self.state
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire in-memory store lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)
    }
}

impl EntryStore for InMemoryEntryStore {
    fn list_entries(&self) -> Result<Vec<FinanceEntry>, Error> {
        let mut entries: Vec<FinanceEntry> = self.lock()?.entries.values().cloned().collect();

        entries.sort_by(|a, b| b.date().cmp(&a.date()).then_with(|| b.id().cmp(&a.id())));

        Ok(entries)
    }

    fn get_by_id(&self, id: EntryId) -> Result<Option<FinanceEntry>, Error> {
        Ok(self.lock()?.entries.get(&id).cloned())
    }

    fn add(&self, entry: FinanceEntry) -> Result<FinanceEntry, Error> {
        let mut state = self.lock()?;
        state.last_id += 1;
        let id = state.last_id;

        let entry = entry.with_id(id);
        state.entries.insert(id, entry.clone());

        Ok(entry)
    }

    fn update(&self, entry: &FinanceEntry) -> Result<(), Error> {
        let Some(id) = entry.id() else {
            return Err(Error::UpdateMissingEntry);
        };

        match self.lock()?.entries.get_mut(&id) {
            Some(stored) => {
                *stored = entry.clone();
                Ok(())
            }
            None => Err(Error::UpdateMissingEntry),
        }
    }

    fn delete(&self, id: EntryId) -> Result<bool, Error> {
        Ok(self.lock()?.entries.remove(&id).is_some())
    }
}

#[cfg(test)]
mod in_memory_entry_store_tests {
    use time::macros::date;

    use crate::{
        Error,
        entry::{Amount, Category, Description, EntryDate, FinanceEntry},
        stores::EntryStore,
    };

    use super::InMemoryEntryStore;

    fn new_entry(description: &str, date: time::Date) -> FinanceEntry {
        FinanceEntry::new(
            Description::new_unchecked(description),
            Amount::new_unchecked(1.0),
            Category::new_unchecked("Misc"),
            EntryDate::new(date),
        )
    }

    #[test]
    fn add_assigns_increasing_ids() {
        let store = InMemoryEntryStore::new();

        let first = store.add(new_entry("A", date!(2024 - 01 - 01))).unwrap();
        let second = store.add(new_entry("B", date!(2024 - 01 - 01))).unwrap();

        assert_eq!(first.id(), Some(1));
        assert_eq!(second.id(), Some(2));
    }

    #[test]
    fn list_entries_orders_by_date_then_id_descending() {
        let store = InMemoryEntryStore::new();
        let old = store.add(new_entry("Old", date!(2023 - 12 - 31))).unwrap();
        let first_new = store.add(new_entry("A", date!(2024 - 05 - 01))).unwrap();
        let second_new = store.add(new_entry("B", date!(2024 - 05 - 01))).unwrap();

        let entries = store.list_entries().unwrap();

        assert_eq!(entries, vec![second_new, first_new, old]);
    }

    #[test]
    fn update_replaces_stored_entry() {
        let store = InMemoryEntryStore::new();
        let mut entry = store.add(new_entry("A", date!(2024 - 01 - 01))).unwrap();
        entry.set_amount(Amount::new_unchecked(99.0));

        store.update(&entry).unwrap();

        assert_eq!(store.get_by_id(entry.id().unwrap()), Ok(Some(entry)));
    }

    #[test]
    fn update_missing_entry_returns_error() {
        let store = InMemoryEntryStore::new();
        let entry = new_entry("A", date!(2024 - 01 - 01)).with_id(5);

        assert_eq!(store.update(&entry), Err(Error::UpdateMissingEntry));
    }

    #[test]
    fn delete_twice_returns_false_the_second_time() {
        let store = InMemoryEntryStore::new();
        let entry = store.add(new_entry("A", date!(2024 - 01 - 01))).unwrap();
        let id = entry.id().unwrap();

        assert_eq!(store.delete(id), Ok(true));
        assert_eq!(store.delete(id), Ok(false));
    }
}
