//! Shared types for dynamic content handling

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_LLM_TTL_SECS, DEFAULT_TEXT_TTL_SECS};

/// The two dynamic node variants a manifest can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DynamicKind {
    /// Direct template substitution, no generation step.
    Plain,
    /// Language-model-generated text with a cached result.
    Generative,
}

impl DynamicKind {
    /// Manifest component type string for this variant.
    pub fn component_type(&self) -> &'static str {
        match self {
            Self::Plain => "DynamicText",
            Self::Generative => "LLMText",
        }
    }

    /// Parse a manifest component type string.
    pub fn from_component_type(s: &str) -> Option<Self> {
        match s {
            "DynamicText" => Some(Self::Plain),
            "LLMText" => Some(Self::Generative),
            _ => None,
        }
    }

    /// Default ttl for nodes that do not declare one.
    pub fn default_ttl_seconds(&self) -> i64 {
        match self {
            Self::Plain => DEFAULT_TEXT_TTL_SECS,
            Self::Generative => DEFAULT_LLM_TTL_SECS,
        }
    }
}

/// Flattened projection of a dynamic node, keyed by content key.
///
/// Upserted on every manifest save. Independent of which board or manifest
/// the node came from: two boards declaring the same template share one
/// config (and one cache entry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicConfig {
    pub content_key: String,
    pub kind: DynamicKind,
    /// Template text for plain nodes, prompt text for generative nodes.
    pub template: String,
    /// Raw comma-separated entity reference list, as declared.
    pub entities: String,
    /// Model key for generative nodes; empty for plain nodes.
    pub model: String,
    pub ttl_seconds: i64,
}
