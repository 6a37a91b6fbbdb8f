use axum_test::{TestResponse, TestServer};
use rusqlite::Connection;
use serde_json::Value;

use crate::{
    ErrorResponse, FinanceEntry, build_router, endpoints, stores::sqlite::create_app_state,
};

/// Create a server for the full router backed by an in-memory SQLite database.
pub(crate) fn get_test_server() -> TestServer {
    let connection = Connection::open_in_memory().expect("Could not open database in memory.");
    let state = create_app_state(connection).expect("Could not create app state.");

    TestServer::try_new(build_router(state)).expect("Could not create test server.")
}

/// Create an entry through the API and return the created entry.
pub(crate) async fn must_create_entry(server: &TestServer, body: Value) -> FinanceEntry {
    let response = server.post(endpoints::ENTRIES).json(&body).await;
    response.assert_status(axum::http::StatusCode::CREATED);

    response.json::<FinanceEntry>()
}

#[track_caller]
pub(crate) fn assert_content_type(response: &TestResponse, content_type: &str) {
    assert_eq!(response.header("content-type"), content_type);
}

#[track_caller]
pub(crate) fn assert_error_message(response: &TestResponse, message: &str) {
    assert_eq!(
        response.json::<ErrorResponse>(),
        ErrorResponse {
            error: message.to_owned()
        }
    );
}
