//! Health check endpoints

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// Liveness check
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": state.version,
    }))
}

/// Readiness check: verifies the store answers queries.
pub async fn ready_check(State(state): State<AppState>) -> Json<Value> {
    let ready = state.db.boards.list().await.is_ok();
    Json(json!({
        "status": if ready { "ready" } else { "degraded" },
    }))
}
