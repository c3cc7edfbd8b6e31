//! CLI command implementations

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use lumen_api::{run_server, ApiConfig, AppState};
use lumen_db::Datastore;

use crate::config::Config;
use crate::import;

type CommandResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Initialize the datastore schema.
pub async fn init(config: &Config) -> CommandResult {
    let datastore = Datastore::connect(&config.db_url).await?;
    datastore.init_schema().await?;
    info!(db_url = %config.db_url, "schema initialized");
    Ok(())
}

/// Start the API server, importing on-disk data first if the store is empty.
pub async fn start(config: &Config, host: String) -> CommandResult {
    let datastore = Arc::new(Datastore::connect(&config.db_url).await?);
    let state = AppState::new(
        datastore,
        config.homeassistant.clone(),
        config.llm.clone(),
        PathBuf::from(&config.storage_dir),
    )
    .await?;

    import::first_run_import(&state.db, config).await?;

    info!(version = %state.version, db_url = %config.db_url, "Lumen server starting");
    if config.homeassistant.is_configured() {
        info!(url = %config.homeassistant.url, "Home Assistant bridge configured");
    }
    if !config.llm.models.is_empty() {
        let models: Vec<&str> = config.llm.models.keys().map(String::as_str).collect();
        info!(models = ?models, "LLM models configured");
    }

    let api_config = ApiConfig {
        host,
        port: config.port,
        enable_cors: true,
    };
    run_server(&api_config, state).await
}

/// Import boards and firmware into an empty store.
pub async fn import(config: &Config) -> CommandResult {
    let datastore = Arc::new(Datastore::connect(&config.db_url).await?);
    let db = lumen_db::Database::new(datastore);
    db.init_schema().await?;
    import::first_run_import(&db, config).await?;
    Ok(())
}
