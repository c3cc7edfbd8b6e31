//! API route handlers

pub mod datasources;
pub mod device;
pub mod dynamic;
pub mod editor;
pub mod health;

use axum::{routing::get, routing::post, Router};

use crate::state::AppState;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        // Dynamic content endpoints
        .route("/dynamic/text", get(dynamic::dynamic_text))
        .route("/dynamic/llm", get(dynamic::dynamic_llm))
        .route("/dynamic/refresh", post(dynamic::refresh_content))
        // Editor endpoints
        .route("/editor/boards", get(editor::list_boards).post(editor::create_board))
        .route(
            "/editor/manifest",
            get(editor::get_manifest).put(editor::put_manifest),
        )
        .route("/editor/schema", get(editor::get_schema))
        // Device endpoints
        .route("/device/screens", get(device::screens))
        .route("/device/version", get(device::version))
        .route("/device/firmware", get(device::firmware))
        // Data source endpoints
        .route("/datasources/resolve", get(datasources::resolve_template))
        .route("/datasources/ha/entities", get(datasources::list_entities))
        .route(
            "/datasources/ha/entity/:entity_id",
            get(datasources::get_entity),
        )
        // State
        .with_state(state)
}
