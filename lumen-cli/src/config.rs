//! Configuration loading from TOML.
//!
//! A missing config file is not an error; everything has a default and CLI
//! flags override the file.

use std::path::Path;

use serde::Deserialize;

use lumen_sources::{HaConfig, LlmConfig};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Datastore endpoint.
    pub db_url: String,
    /// HTTP listen port.
    pub port: u16,
    /// Directory of per-board UI manifests (`<board>/screens.json`).
    pub ui_dir: String,
    /// Directory of per-board firmware builds (`<board>/firmware.bin`).
    pub firmware_dir: String,
    /// Managed storage root (imported firmware lands under `firmware/`).
    pub storage_dir: String,
    /// Pre-shared key for the firmware digest.
    pub secret_key: String,
    /// Firmware version string recorded on import.
    pub version: String,
    pub homeassistant: HaConfig,
    pub llm: LlmConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_url: "mem://".to_string(),
            port: lumen_core::DEFAULT_HTTP_PORT,
            ui_dir: "ui".to_string(),
            firmware_dir: String::new(),
            storage_dir: "storage".to_string(),
            secret_key: String::new(),
            version: String::new(),
            homeassistant: HaConfig::default(),
            llm: LlmConfig::default(),
        }
    }
}

impl Config {
    /// Load config from a TOML file; absent file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let raw = r#"
            db_url = "rocksdb://data/lumen"
            port = 9090
            firmware_dir = "fw"
            secret_key = "s3cret"
            version = "1.4.0"

            [homeassistant]
            url = "http://ha.local:8123"
            token = "tok"

            [llm.models.qwen3-8b]
            url = "http://gpu.local:8000/v1"
            model_id = "Qwen/Qwen3-8B"
        "#;
        let config: Config = toml::from_str(raw).unwrap();
        assert_eq!(config.port, 9090);
        assert!(config.homeassistant.is_configured());
        assert_eq!(
            config.llm.models["qwen3-8b"].model_id,
            "Qwen/Qwen3-8B"
        );
        // Unset keys fall back to defaults.
        assert_eq!(config.ui_dir, "ui");
        assert_eq!(config.llm.default_model, lumen_core::DEFAULT_LLM_MODEL);
    }

    #[test]
    fn test_empty_config_is_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.db_url, "mem://");
        assert_eq!(config.port, lumen_core::DEFAULT_HTTP_PORT);
    }
}
