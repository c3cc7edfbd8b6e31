//! Configuration for outbound collaborators.

use std::collections::HashMap;

use serde::Deserialize;

use lumen_core::DEFAULT_LLM_MODEL;

/// Home Assistant connection settings. Both fields empty means the bridge
/// is not configured; the source still registers and degrades visibly.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HaConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub token: String,
}

impl HaConfig {
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.token.is_empty()
    }
}

/// One generation endpoint: base URL of an OpenAI-compatible server plus
/// the model identifier to request from it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LlmModel {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub model_id: String,
}

/// Generation settings: named models and which one unkeyed nodes use.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub models: HashMap<String, LlmModel>,
    #[serde(default = "default_model_key")]
    pub default_model: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            models: HashMap::new(),
            default_model: default_model_key(),
        }
    }
}

fn default_model_key() -> String {
    DEFAULT_LLM_MODEL.to_string()
}
