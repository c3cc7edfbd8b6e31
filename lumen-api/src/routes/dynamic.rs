//! Dynamic content endpoints: template resolution and LLM-powered text.
//!
//! Both endpoints speak conditional GET: responses carry an `ETag` header
//! with a tag derived from the response text, and a request whose
//! `If-None-Match` matches gets an empty 304. Generation failures are never
//! HTTP errors (the device always receives renderable text) and are never
//! written to the cache, so the next request retries instead of replaying a
//! stale failure.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::info;

use lumen_core::{compute_etag, sanitize_for_device, DynamicConfig, DynamicKind};

use crate::dto::{ContentKeyQuery, DynamicTextResponse};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Resolve a DynamicText template: no LLM, just data source substitution.
pub async fn dynamic_text(
    State(state): State<AppState>,
    Query(query): Query<ContentKeyQuery>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let config = lookup_config(&state, &query.key, DynamicKind::Plain).await?;

    let resolved =
        sanitize_for_device(&state.sources.resolve_template(&config.template).await);
    let etag = compute_etag(&resolved);

    Ok(conditional_response(&headers, resolved, etag))
}

/// Resolve an LLMText prompt and return cached or freshly generated text.
pub async fn dynamic_llm(
    State(state): State<AppState>,
    Query(query): Query<ContentKeyQuery>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let config = lookup_config(&state, &query.key, DynamicKind::Generative).await?;

    // Fresh cache hit: serve as-is.
    if let Some(cached) = state.db.dynamic.get_cached(&query.key).await? {
        if !cached.expired {
            return Ok(conditional_response(&headers, cached.text, cached.etag));
        }
    }

    // Miss or expired: resolve the prompt and regenerate. Two concurrent
    // misses may both reach this point; both generate and the last write
    // wins, which is an accepted generation-API cost, not a correctness
    // hazard.
    let prompt = state.sources.resolve_template(&config.template).await;
    info!(key = %query.key, model = %config.model, "LLM call");

    let (text, etag) = match state.llm.generate(&config.model, &prompt).await {
        Ok(generated) => {
            let text = sanitize_for_device(&generated);
            let etag = state
                .db
                .dynamic
                .set_cached(&query.key, &text, config.ttl_seconds)
                .await?;
            (text, etag)
        }
        // Errors are returned for this request only, never cached.
        Err(e) => {
            let text = e.as_display_text();
            let etag = compute_etag(&text);
            (text, etag)
        }
    };

    Ok(conditional_response(&headers, text, etag))
}

/// Force-expire all cached dynamic content so the next request for each key
/// triggers a fresh resolve.
pub async fn refresh_content(State(state): State<AppState>) -> ApiResult<Json<serde_json::Value>> {
    state.db.dynamic.invalidate_all().await?;
    Ok(Json(json!({"status": "ok"})))
}

async fn lookup_config(
    state: &AppState,
    key: &str,
    expected: DynamicKind,
) -> ApiResult<DynamicConfig> {
    let config = state
        .db
        .dynamic
        .get_config(key)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Unknown content key: {key}")))?;
    if config.kind != expected {
        return Err(ApiError::WrongType(format!(
            "Content key is not a {}",
            expected.component_type()
        )));
    }
    Ok(config)
}

/// Build a 200 with body + `ETag` header, or an empty 304 when the caller's
/// `If-None-Match` already names this tag.
fn conditional_response(headers: &HeaderMap, text: String, etag: String) -> Response {
    let if_none_match = headers
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim_matches('"'));

    if if_none_match == Some(etag.as_str()) {
        return StatusCode::NOT_MODIFIED.into_response();
    }

    (
        StatusCode::OK,
        [(header::ETAG, format!("\"{etag}\""))],
        Json(DynamicTextResponse { text, etag }),
    )
        .into_response()
}
