//! Data source registry and template resolution.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::homeassistant::HomeAssistantSource;
use crate::time::TimeSource;

static TEMPLATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{(\w+):([^}]+)\}\}").expect("template pattern is valid"));

/// A pluggable resolver for one placeholder-prefix namespace.
///
/// `resolve` must not fail: sources degrade to a visible diagnostic or an
/// "unavailable" string so one bad reference never blanks a whole card.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn resolve(&self, key: &str) -> String;
}

/// Prefix → source mapping. Built once at startup, then read-only shared
/// state; registration after construction is not part of the request path.
#[derive(Default)]
pub struct DataSourceRegistry {
    sources: HashMap<String, Arc<dyn DataSource>>,
}

impl DataSourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, prefix: &str, source: Arc<dyn DataSource>) {
        self.sources.insert(prefix.to_string(), source);
    }

    /// Replace every `{{prefix:key}}` placeholder with its resolved value.
    ///
    /// Placeholders are resolved strictly left-to-right; each resolution may
    /// suspend on network I/O. An unknown prefix substitutes a bracketed
    /// diagnostic instead of failing the template.
    pub async fn resolve_template(&self, template: &str) -> String {
        let matches: Vec<(String, String)> = TEMPLATE_PATTERN
            .captures_iter(template)
            .map(|c| (c[1].to_string(), c[2].to_string()))
            .collect();
        if matches.is_empty() {
            return template.to_string();
        }

        let mut result = template.to_string();
        for (prefix, key) in matches {
            let value = match self.sources.get(&prefix) {
                Some(source) => source.resolve(&key).await,
                None => format!("[unknown source: {prefix}]"),
            };
            let placeholder = format!("{{{{{prefix}:{key}}}}}");
            result = result.replace(&placeholder, &value);
        }

        result
    }
}

/// Build the registry from configuration.
///
/// The `ha` source is registered even when unconfigured so its placeholders
/// resolve to a diagnostic naming the missing bridge rather than an unknown
/// prefix. The shared handle lets callers keep using the same source for
/// entity browsing.
pub fn create_registry(ha: Arc<HomeAssistantSource>) -> DataSourceRegistry {
    let mut registry = DataSourceRegistry::new();
    registry.register("time", Arc::new(TimeSource));
    if !ha.is_configured() {
        tracing::warn!("Home Assistant not configured; ha: placeholders will degrade");
    }
    registry.register("ha", ha);
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HaConfig;

    struct EchoSource;

    #[async_trait]
    impl DataSource for EchoSource {
        async fn resolve(&self, key: &str) -> String {
            format!("<{key}>")
        }
    }

    #[tokio::test]
    async fn test_plain_text_passes_through() {
        let registry = DataSourceRegistry::new();
        assert_eq!(registry.resolve_template("no placeholders").await, "no placeholders");
    }

    #[tokio::test]
    async fn test_placeholders_substituted_in_order() {
        let mut registry = DataSourceRegistry::new();
        registry.register("echo", Arc::new(EchoSource));
        let resolved = registry
            .resolve_template("a={{echo:one}} b={{echo:two}}")
            .await;
        assert_eq!(resolved, "a=<one> b=<two>");
    }

    #[tokio::test]
    async fn test_unknown_prefix_yields_diagnostic_not_failure() {
        let mut registry = DataSourceRegistry::new();
        registry.register("echo", Arc::new(EchoSource));
        let resolved = registry
            .resolve_template("x={{mystery:key}} y={{echo:ok}}")
            .await;
        assert_eq!(resolved, "x=[unknown source: mystery] y=<ok>");
    }

    fn unconfigured_registry() -> DataSourceRegistry {
        let config = HaConfig::default();
        create_registry(Arc::new(HomeAssistantSource::new(&config.url, &config.token)))
    }

    #[tokio::test]
    async fn test_unconfigured_ha_resolves_to_bracketed_diagnostic() {
        let registry = unconfigured_registry();
        let resolved = registry
            .resolve_template("Temp: {{ha:sensor.outdoor.temperature}}")
            .await;
        assert_eq!(
            resolved,
            "Temp: [ha:sensor.outdoor.temperature unconfigured]"
        );
    }

    #[tokio::test]
    async fn test_mixed_configured_and_unconfigured_sources() {
        // One resolvable segment and one degraded segment combine into a
        // single string; nothing errors.
        let registry = unconfigured_registry();
        let resolved = registry
            .resolve_template("Now: {{time:hour}}, Temp: {{ha:sensor.outdoor.temperature}}")
            .await;
        assert!(resolved.starts_with("Now: "));
        assert!(resolved.ends_with(", Temp: [ha:sensor.outdoor.temperature unconfigured]"));
        assert!(!resolved.contains("{{time:hour}}"));
    }

    #[tokio::test]
    async fn test_repeated_placeholder_resolves_everywhere() {
        let mut registry = DataSourceRegistry::new();
        registry.register("echo", Arc::new(EchoSource));
        let resolved = registry.resolve_template("{{echo:k}} and {{echo:k}}").await;
        assert_eq!(resolved, "<k> and <k>");
    }
}
