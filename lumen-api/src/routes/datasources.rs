//! Data source utility endpoints: template previews and entity browsing.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};
use tracing::error;

use crate::dto::{EntityListQuery, ResolveQuery, ResolveResponse};
use crate::state::AppState;

/// Test template resolution without saving anything.
pub async fn resolve_template(
    State(state): State<AppState>,
    Query(query): Query<ResolveQuery>,
) -> Json<ResolveResponse> {
    let resolved = state.sources.resolve_template(&query.template).await;
    Json(ResolveResponse {
        template: query.template,
        resolved,
    })
}

/// Browse available Home Assistant entities.
pub async fn list_entities(
    State(state): State<AppState>,
    Query(query): Query<EntityListQuery>,
) -> Json<Value> {
    if !state.ha.is_configured() {
        return Json(json!({"error": "Home Assistant not configured", "entities": []}));
    }

    let states = match state.ha.fetch_all_states().await {
        Ok(states) => states,
        Err(e) => {
            error!(error = %e, "HA entity list failed");
            return Json(json!({"error": e, "entities": []}));
        }
    };

    let mut entities: Vec<Value> = states
        .iter()
        .filter_map(|s| {
            let entity_id = s.get("entity_id").and_then(Value::as_str).unwrap_or("");
            let attrs = s.get("attributes").and_then(Value::as_object);
            let friendly = attrs
                .and_then(|a| a.get("friendly_name"))
                .and_then(Value::as_str)
                .unwrap_or("");
            let domain = entity_id.split_once('.').map(|(d, _)| d).unwrap_or("");

            if let Some(wanted) = &query.domain {
                if domain != wanted {
                    return None;
                }
            }
            if let Some(q) = &query.q {
                let q = q.to_lowercase();
                if !entity_id.to_lowercase().contains(&q)
                    && !friendly.to_lowercase().contains(&q)
                {
                    return None;
                }
            }

            let mut attr_keys: Vec<&str> = attrs
                .map(|a| a.keys().map(String::as_str).filter(|k| *k != "friendly_name").collect())
                .unwrap_or_default();
            attr_keys.sort_unstable();

            Some(json!({
                "entity_id": entity_id,
                "friendly_name": friendly,
                "state": s.get("state").and_then(Value::as_str).unwrap_or("unknown"),
                "domain": domain,
                "attributes": attr_keys,
            }))
        })
        .collect();

    entities.sort_by(|a, b| {
        let a = a.get("entity_id").and_then(Value::as_str).unwrap_or("");
        let b = b.get("entity_id").and_then(Value::as_str).unwrap_or("");
        a.cmp(b)
    });

    Json(json!({"count": entities.len(), "entities": entities}))
}

/// Full details for one HA entity, including every attribute and the
/// template references that would address it.
pub async fn get_entity(
    State(state): State<AppState>,
    Path(entity_id): Path<String>,
) -> Json<Value> {
    if !state.ha.is_configured() {
        return Json(json!({"error": "Home Assistant not configured"}));
    }

    let Some(data) = state.ha.fetch_state(&entity_id).await else {
        return Json(json!({"error": format!("Entity not available: {entity_id}")}));
    };

    let attrs = data
        .get("attributes")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();
    let mut attr_keys: Vec<&String> =
        attrs.keys().filter(|k| k.as_str() != "friendly_name").collect();
    attr_keys.sort();

    let mut template_refs = vec![format!("ha:{entity_id}")];
    template_refs.extend(attr_keys.iter().map(|k| format!("ha:{entity_id}.{k}")));

    Json(json!({
        "entity_id": entity_id,
        "state": data.get("state").and_then(Value::as_str).unwrap_or("unknown"),
        "friendly_name": attrs.get("friendly_name").and_then(Value::as_str).unwrap_or(""),
        "attributes": attrs,
        "template_refs": template_refs,
    }))
}
