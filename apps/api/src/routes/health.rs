use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service version and whether the document store answers a ping.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let store = if state.candidates.store_available().await {
        "up"
    } else {
        "down"
    };

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "candidates-api",
        "store": store
    }))
}
