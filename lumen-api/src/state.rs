//! Application state for the API server

use std::path::PathBuf;
use std::sync::Arc;

use lumen_db::{Database, Datastore, DbError};
use lumen_sources::{
    create_registry, DataSourceRegistry, GenerationService, HaConfig, HomeAssistantSource,
    LlmConfig,
};

/// API server state. Collaborators are passed in explicitly so request
/// handlers stay free of hidden globals and tests can assemble isolated
/// instances.
#[derive(Clone)]
pub struct AppState {
    /// Persistence
    pub db: Arc<Database>,
    /// Data source registry (immutable after startup)
    pub sources: Arc<DataSourceRegistry>,
    /// Home Assistant handle, shared with the registry, for entity browsing
    pub ha: Arc<HomeAssistantSource>,
    /// Generation service
    pub llm: Arc<GenerationService>,
    /// Root directory for stored firmware binaries
    pub storage_dir: PathBuf,
    /// API version
    pub version: String,
}

impl AppState {
    /// Create new app state from a datastore and outbound config.
    pub async fn new(
        datastore: Arc<Datastore>,
        ha_config: HaConfig,
        llm_config: LlmConfig,
        storage_dir: PathBuf,
    ) -> Result<Self, DbError> {
        let db = Arc::new(Database::new(datastore));
        db.init_schema().await?;

        let ha = Arc::new(HomeAssistantSource::new(&ha_config.url, &ha_config.token));
        let sources = Arc::new(create_registry(ha.clone()));
        let llm = Arc::new(GenerationService::new(llm_config));

        Ok(Self {
            db,
            sources,
            ha,
            llm,
            storage_dir,
            version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub enable_cors: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: lumen_core::DEFAULT_HTTP_PORT,
            enable_cors: true,
        }
    }
}
