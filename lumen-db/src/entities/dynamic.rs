//! Dynamic content entities

use chrono::{DateTime, Utc};
use lumen_core::{DynamicConfig, DynamicKind};
use serde::{Deserialize, Serialize};

use crate::error::{DbError, DbResult};

/// Flattened dynamic node config, keyed by content key.
///
/// Upserted whenever a manifest containing the node is saved. Configs for
/// nodes that were edited away are left behind; the leak is bounded by edit
/// frequency, and their keys stay resolvable for devices still rendering an
/// older manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DynamicConfigEntity {
    pub content_key: String,
    /// "DynamicText" or "LLMText".
    pub component_type: String,
    pub template: String,
    pub entities: String,
    pub model: String,
    pub ttl_seconds: i64,
}

impl DynamicConfigEntity {
    pub const TABLE: &'static str = "dynamic_config";

    pub fn from_config(config: &DynamicConfig) -> Self {
        Self {
            content_key: config.content_key.clone(),
            component_type: config.kind.component_type().to_string(),
            template: config.template.clone(),
            entities: config.entities.clone(),
            model: config.model.clone(),
            ttl_seconds: config.ttl_seconds,
        }
    }

    pub fn into_config(self) -> DbResult<DynamicConfig> {
        let kind = DynamicKind::from_component_type(&self.component_type).ok_or_else(|| {
            DbError::Corrupt(format!(
                "dynamic_config {} has component_type '{}'",
                self.content_key, self.component_type
            ))
        })?;
        Ok(DynamicConfig {
            content_key: self.content_key,
            kind,
            template: self.template,
            entities: self.entities,
            model: self.model,
            ttl_seconds: self.ttl_seconds,
        })
    }
}

/// Cached resolved text for one content key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DynamicContentEntity {
    pub content_key: String,
    pub rendered_text: String,
    pub etag: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl DynamicContentEntity {
    pub const TABLE: &'static str = "dynamic_content";

    pub fn new(content_key: String, rendered_text: String, etag: String, ttl_seconds: i64) -> Self {
        let now = Utc::now();
        Self {
            content_key,
            rendered_text,
            etag,
            expires_at: now + chrono::Duration::seconds(ttl_seconds),
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_entity_round_trip() {
        let config = DynamicConfig {
            content_key: "abc".into(),
            kind: DynamicKind::Generative,
            template: "p".into(),
            entities: "a,b".into(),
            model: "qwen3-8b".into(),
            ttl_seconds: 300,
        };
        let entity = DynamicConfigEntity::from_config(&config);
        assert_eq!(entity.component_type, "LLMText");
        assert_eq!(entity.into_config().unwrap(), config);
    }

    #[test]
    fn test_corrupt_component_type_is_rejected() {
        let entity = DynamicConfigEntity {
            content_key: "abc".into(),
            component_type: "Text".into(),
            template: String::new(),
            entities: String::new(),
            model: String::new(),
            ttl_seconds: 60,
        };
        assert!(entity.into_config().is_err());
    }

    #[test]
    fn test_zero_ttl_expires_immediately() {
        let entity =
            DynamicContentEntity::new("k".into(), "text".into(), "etag".into(), 0);
        assert!(entity.expires_at <= Utc::now());
    }
}
