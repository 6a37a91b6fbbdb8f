//! Contains the SQLite backed store and a convenience function for creating
//! an [AppState] that uses it.

mod entry;

pub use entry::{SQLiteEntryStore, create_entry_table};

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{AppState, Error, db::initialize};

/// Creates an [AppState] instance that uses SQLite for the backend.
///
/// This function will modify the database by adding the tables for the domain
/// models to the database.
///
/// # Errors
/// Returns an error if the database cannot be initialized.
pub fn create_app_state(db_connection: Connection) -> Result<AppState, Error> {
    initialize(&db_connection)?;

    let connection = Arc::new(Mutex::new(db_connection));
    let entry_store = SQLiteEntryStore::new(connection);

    Ok(AppState::new(Arc::new(entry_store)))
}
