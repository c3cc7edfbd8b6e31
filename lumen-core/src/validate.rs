//! Manifest validation.
//!
//! Collects every problem into an itemized list instead of failing on the
//! first one; an empty list means the manifest is valid. Callers reject the
//! save atomically when any error is present.

use serde_json::Value;

use crate::schema::{is_container, is_known_type};

/// Validate a manifest document. Returns all errors found; empty = valid.
pub fn validate_manifest(manifest: &Value) -> Vec<String> {
    let mut errors = Vec::new();

    if manifest.get("version").is_none() {
        errors.push("Missing 'version' key".to_string());
    }
    let tabs = manifest.get("tabs").and_then(Value::as_array);
    if tabs.is_none() {
        errors.push("Missing or invalid 'tabs' (must be array)".to_string());
    }
    let screens = manifest.get("screens").and_then(Value::as_object);
    if screens.is_none() {
        errors.push("Missing or invalid 'screens' (must be object)".to_string());
    }
    if manifest.get("default_screen").is_none() {
        errors.push("Missing 'default_screen' key".to_string());
    }

    // Structural errors make the reference checks meaningless; stop here.
    let (tabs, screens) = match (tabs, screens) {
        (Some(tabs), Some(screens)) if errors.is_empty() => (tabs, screens),
        _ => return errors,
    };

    let tab_ids: Vec<i64> = tabs
        .iter()
        .filter_map(|t| t.get("id").and_then(Value::as_i64))
        .collect();

    for tid in &tab_ids {
        if !screens.contains_key(&tid.to_string()) {
            errors.push(format!("Tab id={tid} has no matching screen"));
        }
    }

    let default_screen = manifest.get("default_screen").and_then(Value::as_i64);
    match default_screen {
        Some(id) if tab_ids.contains(&id) => {}
        Some(id) => errors.push(format!("default_screen={id} is not a valid tab id")),
        None => errors.push("default_screen must be an integer tab id".to_string()),
    }

    for (sid, screen) in screens {
        check_node(screen, &format!("screens[{sid}]"), &mut errors);
    }

    errors
}

fn check_node(node: &Value, path: &str, errors: &mut Vec<String>) {
    let Some(obj) = node.as_object() else {
        errors.push(format!("{path}: node is not an object"));
        return;
    };
    let Some(ntype) = obj.get("type").and_then(Value::as_str) else {
        errors.push(format!("{path}: missing 'type'"));
        return;
    };
    if !is_known_type(ntype) {
        errors.push(format!("{path}: unknown component type '{ntype}'"));
    }
    let children = obj.get("children").and_then(Value::as_array);
    if let Some(children) = children {
        if !children.is_empty() && is_known_type(ntype) && !is_container(ntype) {
            errors.push(format!("{path}: leaf component '{ntype}' cannot have children"));
        }
        for (i, child) in children.iter().enumerate() {
            check_node(child, &format!("{path}.children[{i}]"), errors);
        }
    }
}
