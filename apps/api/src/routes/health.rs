use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and the configured
/// snapshot backend.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "resume-api",
        "snapshotBackend": state.config.snapshot_backend.as_str(),
        "enhancementEnabled": state.config.anthropic_api_key.is_some(),
    }))
}
