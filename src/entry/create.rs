//! Finance entry creation endpoint.

use axum::{Json, body::Bytes, extract::State, http::StatusCode};

use crate::{
    Error,
    entry::{EntryFields, EntryService, FinanceEntry},
};

/// Create an entry from a JSON object with the fields `description`,
/// `amount`, `category` and `date`.
///
/// The body is read as JSON regardless of its content type. Responds with
/// 201 and the created entry, or 400 if the body or any field is invalid.
pub async fn create_entry_endpoint(
    State(service): State<EntryService>,
    body: Bytes,
) -> Result<(StatusCode, Json<FinanceEntry>), Error> {
    let fields = EntryFields::from_json(&body)?;
    let entry = service.create(fields)?;

    Ok((StatusCode::CREATED, Json(entry)))
}
