//! Application router configuration.

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;

use crate::{
    AppState, endpoints,
    entry::{
        create_entry_endpoint, delete_entry_endpoint, get_entries_endpoint, get_entry_endpoint,
        update_entry_endpoint,
    },
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
///
/// Cross-origin requests are allowed from any origin.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::HEALTH, get(get_health))
        .route(
            endpoints::ENTRIES,
            get(get_entries_endpoint).post(create_entry_endpoint),
        )
        .route(
            endpoints::ENTRY,
            get(get_entry_endpoint)
                .put(update_entry_endpoint)
                .delete(delete_entry_endpoint),
        )
        .fallback(get_404_not_found)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Liveness check.
async fn get_health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
