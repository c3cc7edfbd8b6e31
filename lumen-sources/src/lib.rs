//! Lumen data sources and generation.
//!
//! Data sources are namespaced with a prefix:
//!
//! - `ha:weather.forecast_home` → Home Assistant entity state
//! - `time:now` → current date/time strings
//!
//! Templates use `{{prefix:key}}` placeholders that get resolved by the
//! matching source; see [`registry::DataSourceRegistry`]. The registry is
//! built once from configuration at startup and is immutable afterwards.
//!
//! [`llm::GenerationService`] calls an OpenAI-compatible chat completions
//! endpoint for generative nodes.

pub mod config;
pub mod homeassistant;
pub mod llm;
pub mod registry;
pub mod time;

pub use config::{HaConfig, LlmConfig, LlmModel};
pub use homeassistant::HomeAssistantSource;
pub use llm::{GenerationError, GenerationService};
pub use registry::{create_registry, DataSource, DataSourceRegistry};
pub use time::TimeSource;
