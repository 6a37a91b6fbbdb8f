//! Finance entry deletion endpoint.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    entry::{EntryId, EntryService},
};

/// The body of a successful delete response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteEntryResponse {
    /// Confirms which entry was deleted.
    pub message: String,
}

/// Delete an entry. Responds with a confirmation message, or 404 if the
/// entry does not exist.
pub async fn delete_entry_endpoint(
    Path(entry_id): Path<EntryId>,
    State(service): State<EntryService>,
) -> Result<Json<DeleteEntryResponse>, Error> {
    if service.delete(entry_id)? {
        Ok(Json(DeleteEntryResponse {
            message: format!("Entry {entry_id} deleted"),
        }))
    } else {
        Err(Error::NotFound)
    }
}

#[cfg(test)]
mod delete_entry_endpoint_tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::{
        endpoints,
        test_utils::{assert_error_message, get_test_server, must_create_entry},
    };

    use super::DeleteEntryResponse;

    #[tokio::test]
    async fn delete_entry_succeeds() {
        let server = get_test_server();
        let entry = must_create_entry(
            &server,
            json!({
                "description": "Coffee",
                "amount": 4.5,
                "category": "Food",
                "date": "2024-01-10",
            }),
        )
        .await;
        let id = entry.id().unwrap();
        let path = endpoints::format_endpoint(endpoints::ENTRY, id);

        let response = server.delete(&path).await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<DeleteEntryResponse>(),
            DeleteEntryResponse {
                message: format!("Entry {id} deleted")
            }
        );
        server
            .get(&path)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_entry_twice_returns_not_found() {
        let server = get_test_server();
        let entry = must_create_entry(
            &server,
            json!({
                "description": "Coffee",
                "amount": 4.5,
                "category": "Food",
                "date": "2024-01-10",
            }),
        )
        .await;
        let path = endpoints::format_endpoint(endpoints::ENTRY, entry.id().unwrap());
        server.delete(&path).await.assert_status_ok();

        let response = server.delete(&path).await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert_error_message(&response, "Entry not found");
    }
}
