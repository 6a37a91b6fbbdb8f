//! Implements a SQLite backed finance entry store.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension, Row};
use time::Date;

use crate::{
    Error,
    entry::{Amount, Category, Description, EntryDate, EntryId, FinanceEntry},
    stores::EntryStore,
};

/// Stores finance entries in the `finance_entries` table of a SQLite database.
///
/// The table must exist before the store is used, see [create_entry_table].
#[derive(Debug, Clone)]
pub struct SQLiteEntryStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteEntryStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)
    }
}

impl EntryStore for SQLiteEntryStore {
    /// Retrieve all entries ordered by date, then ID, both descending.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is an SQL error.
    fn list_entries(&self) -> Result<Vec<FinanceEntry>, Error> {
        let connection = self.lock()?;
        let mut statement = connection.prepare(
            "SELECT id, description, amount, category, date FROM finance_entries
             ORDER BY date DESC, id DESC;",
        )?;

        let entries = statement
            .query_map([], map_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// Retrieve an entry by its `id`.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is an SQL error.
    fn get_by_id(&self, id: EntryId) -> Result<Option<FinanceEntry>, Error> {
        let connection = self.lock()?;

        let entry = connection
            .prepare(
                "SELECT id, description, amount, category, date FROM finance_entries
                 WHERE id = :id;",
            )?
            .query_row(&[(":id", &id)], map_row)
            .optional()?;

        Ok(entry)
    }

    /// Insert `entry` into the database.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is an SQL error.
    fn add(&self, entry: FinanceEntry) -> Result<FinanceEntry, Error> {
        let connection = self.lock()?;

        connection.execute(
            "INSERT INTO finance_entries (description, amount, category, date)
             VALUES (?1, ?2, ?3, ?4);",
            (
                entry.description().as_ref(),
                entry.amount().value(),
                entry.category().as_ref(),
                entry.date().date(),
            ),
        )?;

        let id = connection.last_insert_rowid();

        Ok(entry.with_id(id))
    }

    /// Overwrite all four fields of the stored entry.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::UpdateMissingEntry] if `entry` does not refer to a stored entry,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn update(&self, entry: &FinanceEntry) -> Result<(), Error> {
        let Some(id) = entry.id() else {
            return Err(Error::UpdateMissingEntry);
        };

        let rows_affected = self.lock()?.execute(
            "UPDATE finance_entries
             SET description = ?1, amount = ?2, category = ?3, date = ?4
             WHERE id = ?5;",
            (
                entry.description().as_ref(),
                entry.amount().value(),
                entry.category().as_ref(),
                entry.date().date(),
                id,
            ),
        )?;

        if rows_affected == 0 {
            return Err(Error::UpdateMissingEntry);
        }

        Ok(())
    }

    /// Delete the entry with `id`.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is an SQL error.
    fn delete(&self, id: EntryId) -> Result<bool, Error> {
        let rows_affected = self
            .lock()?
            .execute("DELETE FROM finance_entries WHERE id = ?1;", [id])?;

        Ok(rows_affected > 0)
    }
}

/// Initialize the finance entry table and indexes.
///
/// IDs are never reused, even after the entry with the largest ID is deleted.
pub fn create_entry_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS finance_entries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            description TEXT NOT NULL,
            amount REAL NOT NULL,
            category TEXT NOT NULL,
            date TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_finance_entries_date ON finance_entries(date, id);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<FinanceEntry, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_description: String = row.get(1)?;
    let amount: f64 = row.get(2)?;
    let raw_category: String = row.get(3)?;
    let date: Date = row.get(4)?;

    let entry = FinanceEntry::new(
        Description::new_unchecked(&raw_description),
        Amount::new_unchecked(amount),
        Category::new_unchecked(&raw_category),
        EntryDate::new(date),
    );

    Ok(entry.with_id(id))
}
