//! Finance Tracker is a small REST service for recording personal finance
//! entries.
//!
//! Each entry has a description, an amount, a category and a date. The API
//! lets clients create, list, update and delete entries and reports the
//! running total of every stored amount.
//!
//! The crate is split into layers:
//! - [FinanceEntry] and its value objects ([Description], [Amount], [Category],
//!   [EntryDate]) validate raw input,
//! - [EntryService] implements one use case per method,
//! - [EntryStore] abstracts persistence, with [SQLiteEntryStore] and
//!   [InMemoryEntryStore] as implementations,
//! - [build_router] exposes the service over HTTP as JSON.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde::{Deserialize, Serialize};
use tokio::signal;

mod app_state;
mod db;
pub mod endpoints;
mod entry;
mod logging;
mod not_found;
mod routing;
mod stores;
#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use entry::{
    Amount, Category, Description, EntryDate, EntryFields, EntryId, EntryService, FinanceEntry,
    running_total,
};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use stores::{EntryStore, InMemoryEntryStore, SQLiteEntryStore, sqlite::create_app_state};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty or all-whitespace string was used as an entry description.
    #[error("Description cannot be empty")]
    EmptyDescription,

    /// An empty or all-whitespace string was used as an entry category.
    #[error("Category cannot be empty")]
    EmptyCategory,

    /// A text field was given a value that is not a string.
    ///
    /// The string is the name of the field, e.g. "Description".
    #[error("{0} must be a string")]
    NotText(&'static str),

    /// The amount could not be read as a finite real number.
    ///
    /// Callers should pass in the offending value as a string.
    #[error("Amount must be a valid number, got {0}")]
    InvalidAmount(String),

    /// The date was not a string in the format `YYYY-MM-DD`.
    ///
    /// Callers should pass in the offending value as a string.
    #[error("Invalid date format (use YYYY-MM-DD), got {0}")]
    InvalidDate(String),

    /// A new entry was missing one or more of its fields.
    ///
    /// The string lists the missing field names, separated by commas.
    #[error("Missing fields: {0}")]
    MissingFields(String),

    /// An update request did not contain any entry field.
    #[error("At least one field (description, amount, category, date) required for update")]
    NoFieldsToUpdate,

    /// The request body could not be parsed as a JSON object.
    #[error("Request body must be a JSON object: {0}")]
    InvalidJson(String),

    /// The requested entry was not found.
    ///
    /// For HTTP request handlers, the client should check that the ID is
    /// correct and that the entry has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("Entry not found")]
    NotFound,

    /// Tried to update an entry that does not exist
    #[error("tried to update an entry that is not in the database")]
    UpdateMissingEntry,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

/// The broad class of an [Error], used to decide how it is reported to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or missing input. The client should fix the request.
    Validation,
    /// The referenced entry does not exist.
    NotFound,
    /// The storage backend failed. The client may retry later.
    Storage,
}

impl Error {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::EmptyDescription
            | Error::EmptyCategory
            | Error::NotText(_)
            | Error::InvalidAmount(_)
            | Error::InvalidDate(_)
            | Error::MissingFields(_)
            | Error::NoFieldsToUpdate
            | Error::InvalidJson(_) => ErrorKind::Validation,
            Error::NotFound | Error::UpdateMissingEntry => ErrorKind::NotFound,
            Error::SqlError(_) | Error::DatabaseLockError => ErrorKind::Storage,
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

/// The JSON body sent to the client when a request fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// A human readable description of what went wrong.
    pub error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match self.kind() {
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, self.to_string()),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, Error::NotFound.to_string()),
            // Storage errors are not intended to be shown to the client.
            ErrorKind::Storage => {
                tracing::error!("An unexpected error occurred: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred, check the server logs for more details."
                        .to_owned(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
