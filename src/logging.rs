//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{request, response},
    middleware::Next,
    response::Response,
};

/// Bodies longer than this many characters are truncated in `info` logs.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] characters, it is
/// truncated and the full body is logged at the `debug` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body = read_body(body).await;
    log_request(&parts, &String::from_utf8_lossy(&body));

    let request = Request::from_parts(parts, Body::from(body));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body = read_body(body).await;
    log_response(&parts, &String::from_utf8_lossy(&body));

    Response::from_parts(parts, Body::from(body))
}

/// Buffer a body so it can be logged and then passed on.
///
/// A body that fails to read is logged and replaced with an empty body.
async fn read_body(body: Body) -> Bytes {
    axum::body::to_bytes(body, usize::MAX)
        .await
        .inspect_err(|error| tracing::error!("Could not read body for logging: {error}"))
        .unwrap_or_default()
}

/// Cut `body` down to [LOG_BODY_LENGTH_LIMIT] characters.
///
/// Returns `None` if the body is already short enough.
fn truncate(body: &str) -> Option<String> {
    if body.chars().count() > LOG_BODY_LENGTH_LIMIT {
        Some(body.chars().take(LOG_BODY_LENGTH_LIMIT).collect())
    } else {
        None
    }
}

fn log_request(parts: &request::Parts, body: &str) {
    match truncate(body) {
        Some(truncated) => {
            tracing::info!("Received request: {parts:#?}\nbody: {truncated}...");
            tracing::debug!("Full request body: {body:?}");
        }
        None => tracing::info!("Received request: {parts:#?}\nbody: {body:?}"),
    }
}

fn log_response(parts: &response::Parts, body: &str) {
    match truncate(body) {
        Some(truncated) => {
            tracing::info!("Sending response: {parts:#?}\nbody: {truncated}...");
            tracing::debug!("Full response body: {body:?}");
        }
        None => tracing::info!("Sending response: {parts:#?}\nbody: {body:?}"),
    }
}
