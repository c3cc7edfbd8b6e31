//! Editor endpoints: board and manifest CRUD, schema serving.

use axum::{
    extract::{Query, State},
    Json,
};
use serde_json::{json, Value};
use tracing::info;

use lumen_core::{schema::component_schema, validate_manifest};

use crate::dto::{BoardListResponse, BoardQuery, BoardSummaryResponse, CreateBoardRequest};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// List boards that have UI manifests.
pub async fn list_boards(State(state): State<AppState>) -> ApiResult<Json<BoardListResponse>> {
    let summaries = state.db.boards.list_summaries().await?;
    Ok(Json(BoardListResponse {
        boards: summaries
            .into_iter()
            .map(|s| BoardSummaryResponse {
                name: s.name,
                screen_count: s.screen_count,
            })
            .collect(),
    }))
}

/// Create a new board with a minimal default manifest.
pub async fn create_board(
    State(state): State<AppState>,
    Json(req): Json<CreateBoardRequest>,
) -> ApiResult<Json<Value>> {
    let name = req.name.trim();
    if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
        return Err(ApiError::Validation(vec![format!(
            "Invalid board name: '{name}'"
        )]));
    }
    if state.db.boards.exists(name).await? {
        return Err(ApiError::Conflict(format!("Board '{name}' already exists")));
    }

    state.db.boards.create(name).await?;
    state
        .db
        .manifests
        .save(name, default_manifest())
        .await?;

    info!(board = %name, "created board");
    Ok(Json(json!({"ok": true})))
}

/// Return the full active manifest for a board.
pub async fn get_manifest(
    State(state): State<AppState>,
    Query(query): Query<BoardQuery>,
) -> ApiResult<Json<Value>> {
    let entity = state
        .db
        .manifests
        .get_active(&query.board)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No UI manifest for board: {}", query.board)))?;
    Ok(Json(entity.manifest))
}

/// Validate and save a manifest for a board. Rejection is atomic: on any
/// validation error nothing is written.
pub async fn put_manifest(
    State(state): State<AppState>,
    Query(query): Query<BoardQuery>,
    Json(manifest): Json<Value>,
) -> ApiResult<Json<Value>> {
    if !state.db.boards.exists(&query.board).await? {
        return Err(ApiError::NotFound(format!("No board: {}", query.board)));
    }

    let errors = validate_manifest(&manifest);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let configs = state.db.manifests.save(&query.board, manifest).await?;
    info!(
        board = %query.board,
        config_count = configs.len(),
        "saved manifest"
    );
    Ok(Json(json!({"ok": true})))
}

/// Return the component type schema for the web editor.
pub async fn get_schema() -> Json<Value> {
    Json(component_schema().clone())
}

/// Starter manifest for a freshly created board: one home tab with a
/// single centered label.
fn default_manifest() -> Value {
    json!({
        "version": 1,
        "default_screen": 32,
        "tabs": [
            {"id": 32, "icon": "\u{F015}", "label": "Home"},
        ],
        "screens": {
            "32": {
                "type": "FlexLayout",
                "props": {"direction": "column", "align": "center", "gap": 12},
                "children": [
                    {"type": "Text", "props": {"size": 4}, "text": "\u{F015} Home"},
                ],
            },
        },
    })
}
