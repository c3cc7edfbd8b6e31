//! Manifest tree walking and content key injection.
//!
//! Runs once per manifest save, before the manifest is persisted: every
//! dynamic node gets its derived `content_key` written back into the tree so
//! the device can address content without recomputing the hash, and the
//! flattened configs are collected for upserting alongside the manifest.

use serde_json::Value;

use crate::constants::DEFAULT_LLM_MODEL;
use crate::key::compute_content_key;
use crate::types::{DynamicConfig, DynamicKind};

/// Walk every screen tree in the manifest, injecting `content_key` into each
/// dynamic node in place and returning the collected configs.
///
/// The walk is pre-order over the `children` relation, iterative with an
/// explicit stack so arbitrarily deep trees cannot overflow the call stack.
/// The input is a freshly parsed JSON document, so there are no back-edges
/// to guard against.
pub fn extract_dynamic_configs(manifest: &mut Value) -> Vec<DynamicConfig> {
    let mut configs = Vec::new();

    let Some(screens) = manifest.get_mut("screens").and_then(Value::as_object_mut) else {
        return configs;
    };

    for screen in screens.values_mut() {
        let mut stack: Vec<&mut Value> = vec![screen];
        while let Some(node) = stack.pop() {
            visit_node(node, &mut configs);
            if let Some(children) = node.get_mut("children").and_then(Value::as_array_mut) {
                // Reverse push keeps document order on the LIFO stack.
                for child in children.iter_mut().rev() {
                    stack.push(child);
                }
            }
        }
    }

    configs
}

fn visit_node(node: &mut Value, configs: &mut Vec<DynamicConfig>) {
    let Some(kind) = node
        .get("type")
        .and_then(Value::as_str)
        .and_then(DynamicKind::from_component_type)
    else {
        return;
    };

    let text_field = match kind {
        DynamicKind::Plain => "template",
        DynamicKind::Generative => "prompt",
    };
    let template = str_field(node, text_field);
    let entities = str_field(node, "entities");
    let model = match kind {
        DynamicKind::Plain => String::new(),
        DynamicKind::Generative => {
            let declared = str_field(node, "model");
            if declared.is_empty() {
                DEFAULT_LLM_MODEL.to_string()
            } else {
                declared
            }
        }
    };
    let ttl_seconds = node
        .get("props")
        .and_then(|p| p.get("ttl"))
        .and_then(Value::as_i64)
        .unwrap_or_else(|| kind.default_ttl_seconds());

    let key = compute_content_key(&template, &entities, &model);
    if let Some(obj) = node.as_object_mut() {
        obj.insert("content_key".to_string(), Value::String(key.clone()));
    }

    configs.push(DynamicConfig {
        content_key: key,
        kind,
        template,
        entities,
        model,
        ttl_seconds,
    });
}

fn str_field(node: &Value, field: &str) -> String {
    node.get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_manifest() -> Value {
        json!({
            "version": 1,
            "default_screen": 1,
            "tabs": [{"id": 1, "label": "Home"}],
            "screens": {
                "1": {
                    "type": "FlexLayout",
                    "children": [
                        {"type": "Text", "text": "static"},
                        {
                            "type": "Card",
                            "children": [{
                                "type": "DynamicText",
                                "template": "Now: {{time:now}}",
                                "entities": "",
                                "props": {"ttl": 30}
                            }]
                        },
                        {
                            "type": "LLMText",
                            "prompt": "Summarize the weather",
                            "model": "qwen3-8b",
                            "entities": "weather.home",
                            "props": {"ttl": 600}
                        }
                    ]
                }
            }
        })
    }

    #[test]
    fn test_walk_collects_configs_and_injects_keys() {
        let mut manifest = sample_manifest();
        let configs = extract_dynamic_configs(&mut manifest);
        assert_eq!(configs.len(), 2);

        let plain = &configs[0];
        assert_eq!(plain.kind, DynamicKind::Plain);
        assert_eq!(plain.ttl_seconds, 30);
        assert_eq!(plain.model, "");

        let generative = &configs[1];
        assert_eq!(generative.kind, DynamicKind::Generative);
        assert_eq!(generative.model, "qwen3-8b");

        // Keys are injected into the nested nodes themselves.
        let injected = &manifest["screens"]["1"]["children"][1]["children"][0]["content_key"];
        assert_eq!(injected.as_str().unwrap(), plain.content_key);
        let injected = &manifest["screens"]["1"]["children"][2]["content_key"];
        assert_eq!(injected.as_str().unwrap(), generative.content_key);
    }

    #[test]
    fn test_resave_is_idempotent() {
        let mut first = sample_manifest();
        let configs_first = extract_dynamic_configs(&mut first);

        // Walk the already-injected manifest again: same keys, same configs.
        let mut second = first.clone();
        let configs_second = extract_dynamic_configs(&mut second);
        assert_eq!(configs_first, configs_second);
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let mut manifest = json!({
            "screens": {
                "1": {"type": "LLMText", "prompt": "p"}
            }
        });
        let configs = extract_dynamic_configs(&mut manifest);
        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].model, DEFAULT_LLM_MODEL);
        assert_eq!(
            configs[0].ttl_seconds,
            DynamicKind::Generative.default_ttl_seconds()
        );
    }

    #[test]
    fn test_deeply_nested_tree_does_not_overflow() {
        let mut node = json!({"type": "DynamicText", "template": "leaf", "entities": ""});
        for _ in 0..4_000 {
            node = json!({"type": "Card", "children": [node]});
        }
        let mut manifest = json!({"screens": {"1": node}});
        let configs = extract_dynamic_configs(&mut manifest);
        assert_eq!(configs.len(), 1);
    }

    #[test]
    fn test_non_object_screens_are_ignored() {
        let mut manifest = json!({"screens": {"1": 42, "2": null}});
        assert!(extract_dynamic_configs(&mut manifest).is_empty());
        let mut manifest = json!({"tabs": []});
        assert!(extract_dynamic_configs(&mut manifest).is_empty());
    }
}
