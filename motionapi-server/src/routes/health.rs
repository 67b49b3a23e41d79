//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub collection: String,
}

/// GET /health
///
/// Does not touch the store.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = &state.config().store;
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        collection: format!("{}.{}", store.default_database, store.collection_name),
    })
}

/// Health routes
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
