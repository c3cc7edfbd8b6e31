//! Component property schema.
//!
//! Mirrors the component registry compiled into the device firmware. Served
//! to the web editor so it can build prop forms dynamically; consulted by
//! manifest validation for the known-type and container checks.

use once_cell::sync::Lazy;
use serde_json::{json, Value};

static COMPONENT_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "Text": {
            "container": false,
            "fields": {
                "text": {"type": "string", "default": "", "label": "Text content", "location": "top"},
            },
            "props": {
                "size": {"type": "int", "default": 3, "min": 1, "max": 5, "label": "Font size"},
                "color": {"type": "color", "default": null, "label": "Text color"},
            },
        },
        "Card": {
            "container": true,
            "fields": {},
            "props": {
                "bg": {"type": "color", "default": null, "label": "Background"},
                "border": {"type": "color", "default": null, "label": "Border"},
                "radius": {"type": "int", "default": null, "label": "Radius"},
                "pad": {"type": "int", "default": null, "label": "Padding"},
                "gap": {"type": "int", "default": null, "label": "Gap"},
            },
        },
        "FillScreen": {
            "container": true,
            "fields": {},
            "props": {
                "color": {"type": "color", "default": null, "label": "Background"},
                "pad": {"type": "int", "default": null, "label": "Padding"},
                "gap": {"type": "int", "default": null, "label": "Gap"},
            },
        },
        "FlexLayout": {
            "container": true,
            "fields": {},
            "props": {
                "direction": {"type": "enum", "options": ["row", "column"], "default": "column", "label": "Direction"},
                "gap": {"type": "int", "default": null, "label": "Gap"},
                "align": {"type": "enum", "options": ["left", "center", "right"], "default": "left", "label": "Align"},
            },
        },
        "ScrollContainer": {
            "container": true,
            "fields": {},
            "props": {
                "pad": {"type": "int", "default": null, "label": "Padding"},
                "gap": {"type": "int", "default": null, "label": "Gap"},
                "maxWidth": {"type": "int", "default": null, "label": "Max width"},
            },
        },
        "TitledCard": {
            "container": true,
            "fields": {},
            "props": {
                "icon": {"type": "icon", "default": "", "label": "Icon"},
                "title": {"type": "string", "default": "", "label": "Title"},
                "bg": {"type": "color", "default": null, "label": "Background"},
                "border": {"type": "color", "default": null, "label": "Border"},
            },
        },
        "GaugeCard": {
            "container": false,
            "fields": {},
            "props": {
                "label": {"type": "string", "default": "", "label": "Label"},
                "value": {"type": "string", "default": "", "label": "Value"},
            },
        },
        "HAToggle": {
            "container": false,
            "props": {},
            "fields": {
                "entity": {"type": "string", "default": "", "label": "HA entity ID", "location": "top"},
            },
        },
        "HAWeather": {
            "container": false,
            "props": {},
            "fields": {
                "entity": {"type": "string", "default": "", "label": "HA entity ID", "location": "top"},
            },
        },
        "HABinarySensor": {
            "container": false,
            "props": {},
            "fields": {
                "entity": {"type": "string", "default": "", "label": "HA entity ID", "location": "top"},
                "label": {"type": "string", "default": "", "label": "Display label", "location": "top"},
            },
        },
        "DynamicText": {
            "container": false,
            "fields": {
                "template": {"type": "string", "default": "", "label": "Template (use {{source:key}} for data)", "location": "top"},
                "entities": {"type": "string", "default": "", "label": "Data sources (comma-separated)", "location": "top"},
            },
            "props": {
                "ttl": {"type": "int", "default": 60, "min": 10, "max": 86400, "label": "Refresh interval (seconds)"},
                "size": {"type": "int", "default": 3, "min": 1, "max": 5, "label": "Font size"},
                "color": {"type": "color", "default": null, "label": "Text color"},
            },
        },
        "LLMText": {
            "container": false,
            "fields": {
                "prompt": {"type": "string", "default": "", "label": "LLM prompt (use {{source:key}} for context)", "location": "top"},
                "model": {"type": "enum", "options": ["qwen3-8b", "qwen3-30b"], "default": "qwen3-8b", "label": "LLM model"},
                "entities": {"type": "string", "default": "", "label": "Data sources (comma-separated)", "location": "top"},
            },
            "props": {
                "ttl": {"type": "int", "default": 300, "min": 30, "max": 86400, "label": "Cache TTL (seconds)"},
                "size": {"type": "int", "default": 3, "min": 1, "max": 5, "label": "Font size"},
                "color": {"type": "color", "default": null, "label": "Text color"},
            },
        },
    })
});

/// Full schema document, as served to the editor.
pub fn component_schema() -> &'static Value {
    &COMPONENT_SCHEMA
}

/// Whether a component type exists in the registry.
pub fn is_known_type(component_type: &str) -> bool {
    COMPONENT_SCHEMA.get(component_type).is_some()
}

/// Whether a component type may carry children. Unknown types are not
/// containers.
pub fn is_container(component_type: &str) -> bool {
    COMPONENT_SCHEMA
        .get(component_type)
        .and_then(|s| s.get("container"))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dynamic_types_are_registered_leaves() {
        for t in ["DynamicText", "LLMText"] {
            assert!(is_known_type(t));
            assert!(!is_container(t));
        }
    }

    #[test]
    fn test_layout_types_are_containers() {
        for t in ["Card", "FlexLayout", "FillScreen", "ScrollContainer", "TitledCard"] {
            assert!(is_container(t));
        }
        assert!(!is_container("Text"));
        assert!(!is_container("NoSuchComponent"));
    }
}
