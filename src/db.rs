//! Sets up the application's SQLite database.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::stores::sqlite::create_entry_table;

/// Create the tables for the domain models if they do not exist yet.
///
/// The tables are created in a single transaction, so either all of them are
/// created or none are. Calling this function on an initialized database is a
/// no-op.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_entry_table(&transaction)?;

    transaction.commit()
}
