//! LLM generation service for OpenAI-compatible endpoints.
//!
//! Failures come back as a tagged [`GenerationError`], not as text: callers
//! decide how to render an error and, crucially, must never cache one. An
//! unknown model key fails locally without touching the network.

use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::{error, info};

use lumen_core::{GENERATION_TIMEOUT_SECS, LLM_MAX_TOKENS, LLM_TEMPERATURE};

use crate::config::{LlmConfig, LlmModel};

/// Why a generation attempt produced no text.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("unknown model '{0}'")]
    UnknownModel(String),

    #[error("request failed: HTTP {0}")]
    Status(u16),

    #[error("timeout")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("no response")]
    Empty,
}

impl GenerationError {
    /// Render as the device-visible diagnostic. The marker prefix is part
    /// of the device contract; the text is still renderable on screen.
    pub fn as_display_text(&self) -> String {
        format!("[LLM error: {self}]")
    }
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: String,
}

pub struct GenerationService {
    models: HashMap<String, LlmModel>,
    default_model: String,
    client: reqwest::Client,
}

impl GenerationService {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            models: config.models,
            default_model: config.default_model,
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(GENERATION_TIMEOUT_SECS))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Generate text for a resolved prompt. An empty `model_key` selects
    /// the configured default model.
    pub async fn generate(&self, model_key: &str, prompt: &str) -> Result<String, GenerationError> {
        let key = if model_key.is_empty() {
            self.default_model.as_str()
        } else {
            model_key
        };
        let model = self
            .models
            .get(key)
            .ok_or_else(|| GenerationError::UnknownModel(key.to_string()))?;

        let endpoint = format!("{}/chat/completions", model.url.trim_end_matches('/'));
        let model_id = if model.model_id.is_empty() {
            key
        } else {
            model.model_id.as_str()
        };

        info!(endpoint = %endpoint, model_id = %model_id, "LLM request");

        let body = json!({
            "model": model_id,
            "messages": [{"role": "user", "content": prompt}],
            "max_tokens": LLM_MAX_TOKENS,
            "temperature": LLM_TEMPERATURE,
        });

        let response = self
            .client
            .post(&endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(endpoint = %endpoint, error = %e, "LLM call failed");
                if e.is_timeout() {
                    GenerationError::Timeout
                } else {
                    GenerationError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!(
                endpoint = %endpoint,
                status = status.as_u16(),
                body = %text.chars().take(500).collect::<String>(),
                "LLM call returned non-success"
            );
            return Err(GenerationError::Status(status.as_u16()));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .ok_or(GenerationError::Empty)?;
        if content.is_empty() {
            return Err(GenerationError::Empty);
        }
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_model_fails_locally() {
        let service = GenerationService::new(LlmConfig::default());
        let err = service.generate("qwen3-8b", "hello").await.unwrap_err();
        assert!(matches!(err, GenerationError::UnknownModel(_)));
        assert_eq!(
            err.as_display_text(),
            "[LLM error: unknown model 'qwen3-8b']"
        );
    }

    #[tokio::test]
    async fn test_empty_model_key_uses_default() {
        let service = GenerationService::new(LlmConfig::default());
        let err = service.generate("", "hello").await.unwrap_err();
        match err {
            GenerationError::UnknownModel(key) => {
                assert_eq!(key, lumen_core::DEFAULT_LLM_MODEL)
            }
            other => panic!("expected UnknownModel, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let mut config = LlmConfig::default();
        config.models.insert(
            "local".to_string(),
            LlmModel {
                url: "http://127.0.0.1:9/v1".to_string(),
                model_id: "test".to_string(),
            },
        );
        let service = GenerationService::new(config);
        let err = service.generate("local", "hello").await.unwrap_err();
        assert!(matches!(err, GenerationError::Transport(_) | GenerationError::Timeout));
    }

    #[test]
    fn test_display_text_carries_error_marker() {
        let err = GenerationError::Status(502);
        assert!(err.as_display_text().starts_with("[LLM error: "));
    }
}
