//! Finance entry listing endpoint.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    entry::{EntryService, FinanceEntry, running_total},
};

/// All entries and the sum of their amounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntriesResponse {
    /// Every entry, most recent first.
    pub entries: Vec<FinanceEntry>,
    /// The sum of the amounts of `entries`.
    pub running_total: f64,
}

/// List every entry along with the running total.
pub async fn get_entries_endpoint(
    State(service): State<EntryService>,
) -> Result<Json<EntriesResponse>, Error> {
    let entries = service.list()?;
    let running_total = running_total(&entries);

    Ok(Json(EntriesResponse {
        entries,
        running_total,
    }))
}
