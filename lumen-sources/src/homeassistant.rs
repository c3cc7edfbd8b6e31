//! Home Assistant data source.
//!
//! Resolves entity state over the HA REST API. Keys support dot-notation
//! for attributes:
//!
//! - `ha:weather.forecast_home` → summary of the entity
//! - `ha:weather.forecast_home.temperature` → just that attribute
//!
//! HA entity IDs use exactly one dot (`domain.object_id`), so the first dot
//! separates the domain and any further dot starts an attribute path.
//!
//! Every failure mode degrades to a string: an unconfigured bridge yields a
//! bracketed diagnostic, transport errors and missing attributes yield
//! `unavailable`. Template resolution never fails because of this source.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{error, warn};

use lumen_core::STATE_QUERY_TIMEOUT_SECS;

use crate::registry::DataSource;

/// Attributes included in an entity summary, in order.
const SUMMARY_ATTRS: [&str; 5] = [
    "temperature",
    "temperature_unit",
    "humidity",
    "friendly_name",
    "unit_of_measurement",
];

pub struct HomeAssistantSource {
    url: String,
    token: String,
    client: reqwest::Client,
}

impl HomeAssistantSource {
    pub fn new(url: &str, token: &str) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(STATE_QUERY_TIMEOUT_SECS))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Fetch the raw state document for an entity.
    pub async fn fetch_state(&self, entity_id: &str) -> Option<Value> {
        let url = format!("{}/api/states/{}", self.url, entity_id);
        let response = match self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                error!(entity_id = %entity_id, error = %e, "HA state query failed");
                return None;
            }
        };
        if !response.status().is_success() {
            warn!(entity_id = %entity_id, status = %response.status(), "HA returned non-success");
            return None;
        }
        response.json().await.ok()
    }

    /// Fetch all entity states (editor browsing).
    pub async fn fetch_all_states(&self) -> Result<Vec<Value>, String> {
        let url = format!("{}/api/states", self.url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !response.status().is_success() {
            return Err(format!("HA returned HTTP {}", response.status().as_u16()));
        }
        response.json().await.map_err(|e| e.to_string())
    }

    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.token.is_empty()
    }
}

#[async_trait]
impl DataSource for HomeAssistantSource {
    async fn resolve(&self, key: &str) -> String {
        if !self.is_configured() {
            return format!("[ha:{key} unconfigured]");
        }

        let parts: Vec<&str> = key.split('.').collect();
        let (entity_id, attr_path) = if parts.len() >= 3 {
            (format!("{}.{}", parts[0], parts[1]), Some(parts[2..].join(".")))
        } else {
            (key.to_string(), None)
        };

        let Some(data) = self.fetch_state(&entity_id).await else {
            return "unavailable".to_string();
        };

        if let Some(attr_path) = attr_path {
            let attrs = data.get("attributes");
            match attrs.and_then(|a| a.get(&attr_path)) {
                Some(value) => display_value(value),
                // The state itself is addressable as a pseudo-attribute.
                None if attr_path == "state" => data
                    .get("state")
                    .map(display_value)
                    .unwrap_or_else(|| "unknown".to_string()),
                None => "unavailable".to_string(),
            }
        } else {
            let state = data
                .get("state")
                .map(display_value)
                .unwrap_or_else(|| "unknown".to_string());
            let mut summary = vec![format!("state={state}")];
            if let Some(attrs) = data.get("attributes").and_then(Value::as_object) {
                for attr in SUMMARY_ATTRS {
                    if let Some(value) = attrs.get(attr) {
                        summary.push(format!("{attr}={}", display_value(value)));
                    }
                }
            }
            summary.join(", ")
        }
    }
}

/// Render a JSON value the way a human would write it: strings without
/// quotes, everything else in its JSON form.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
