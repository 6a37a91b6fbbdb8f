//! Finance entry update endpoint.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
};

use crate::{
    Error,
    entry::{EntryFields, EntryId, EntryService, FinanceEntry},
};

/// Update an entry from a JSON object with any of the fields `description`,
/// `amount`, `category` and `date`.
///
/// Responds with the updated entry, 404 if the entry does not exist, or 400
/// if the body is invalid or contains none of the entry fields.
pub async fn update_entry_endpoint(
    Path(entry_id): Path<EntryId>,
    State(service): State<EntryService>,
    body: Bytes,
) -> Result<Json<FinanceEntry>, Error> {
    let fields = EntryFields::from_json(&body)?;

    if fields.is_empty() {
        return Err(Error::NoFieldsToUpdate);
    }

    service.update(entry_id, fields).map(Json)
}
