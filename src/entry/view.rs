//! Endpoint for fetching a single finance entry.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    Error,
    entry::{EntryId, EntryService, FinanceEntry},
};

/// Get a single entry, or 404 if it does not exist.
pub async fn get_entry_endpoint(
    Path(entry_id): Path<EntryId>,
    State(service): State<EntryService>,
) -> Result<Json<FinanceEntry>, Error> {
    service.get(entry_id).map(Json)
}

#[cfg(test)]
mod get_entry_endpoint_tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::{
        FinanceEntry, endpoints,
        test_utils::{assert_error_message, get_test_server, must_create_entry},
    };

    #[tokio::test]
    async fn get_entry_returns_created_entry() {
        let server = get_test_server();
        let created = must_create_entry(
            &server,
            json!({
                "description": "  Coffee ",
                "amount": 4.5,
                "category": "Food",
                "date": "2024-01-10",
            }),
        )
        .await;

        let response = server
            .get(&endpoints::format_endpoint(
                endpoints::ENTRY,
                created.id().unwrap(),
            ))
            .await;

        response.assert_status_ok();
        let entry = response.json::<FinanceEntry>();
        assert_eq!(entry, created);
        assert_eq!(entry.description().as_ref(), "Coffee");
    }

    #[tokio::test]
    async fn get_entry_with_invalid_id_returns_not_found() {
        let server = get_test_server();

        let response = server
            .get(&endpoints::format_endpoint(endpoints::ENTRY, 42))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert_error_message(&response, "Entry not found");
    }
}
