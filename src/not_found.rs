//! The fallback handler for requests that match no route.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::ErrorResponse;

/// Respond with 404 and a JSON error body.
pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

/// The response sent for unknown routes.
pub fn get_404_not_found_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Not found".to_owned(),
        }),
    )
        .into_response()
}
