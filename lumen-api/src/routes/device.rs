//! Device endpoints: manifest serving and firmware OTA.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::warn;

use crate::dto::{BoardQuery, FirmwareInfoResponse};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Active UI manifest for a board, as rendered by the device.
pub async fn screens(
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

/// Latest firmware metadata for a board. The device compares `version` and
/// verifies `hmac` before flashing.
pub async fn version(
    State(state): State<AppState>,
    Query(query): Query<BoardQuery>,
) -> ApiResult<Json<FirmwareInfoResponse>> {
    let fw = state
        .db
        .firmware
        .latest(&query.board)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No firmware for board: {}", query.board)))?;
    Ok(Json(FirmwareInfoResponse {
        version: fw.version,
        size: fw.size,
        hmac: fw.hmac,
    }))
}

/// Stream the latest firmware binary for a board.
pub async fn firmware(
    State(state): State<AppState>,
    Query(query): Query<BoardQuery>,
) -> ApiResult<Response> {
    let fw = state
        .db
        .firmware
        .latest(&query.board)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No firmware for board: {}", query.board)))?;

    let path = state.storage_dir.join("firmware").join(&fw.filename);
    let bytes = tokio::fs::read(&path).await.map_err(|e| {
        warn!(path = %path.display(), error = %e, "firmware file missing");
        ApiError::NotFound(format!("Firmware file missing: {}", fw.filename))
    })?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (header::CONTENT_LENGTH, bytes.len().to_string()),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=firmware.bin".to_string(),
            ),
        ],
        bytes,
    )
        .into_response())
}
