//! Manifest repository.
//!
//! `save` is the write path for the dynamic content subsystem: it walks the
//! manifest tree, injects content keys, and commits the key-injected
//! manifest together with the derived config upserts and the deactivation of
//! the previous active manifest as one transaction. A reader can never
//! observe a persisted manifest whose dynamic nodes lack their keys.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use lumen_core::{extract_dynamic_configs, DynamicConfig};

use crate::datastore::Datastore;
use crate::entities::{DynamicConfigEntity, ManifestEntity};
use crate::error::{DbError, DbResult};

pub struct ManifestRepo {
    datastore: Arc<Datastore>,
}

impl ManifestRepo {
    pub fn new(datastore: Arc<Datastore>) -> Self {
        Self { datastore }
    }

    /// Get the active manifest for a board.
    pub async fn get_active(&self, board: &str) -> DbResult<Option<ManifestEntity>> {
        let query = format!(
            "SELECT * FROM {} WHERE board = $board AND is_active = true LIMIT 1",
            ManifestEntity::TABLE
        );
        let mut response = self
            .datastore
            .client()
            .query(query)
            .bind(("board", board.to_string()))
            .await
            .map_err(|e| DbError::Query(e.to_string()))?;

        let result: Option<ManifestEntity> = response
            .take(0)
            .map_err(|e| DbError::Query(e.to_string()))?;

        Ok(result)
    }

    /// Save a manifest for a board: derive and inject content keys, then
    /// atomically deactivate the previous active manifest, insert the new
    /// one, and upsert the derived dynamic configs.
    ///
    /// Returns the persisted configs. The caller is responsible for
    /// validating the manifest and for checking that the board exists.
    pub async fn save(&self, board: &str, mut manifest: Value) -> DbResult<Vec<DynamicConfig>> {
        let configs = extract_dynamic_configs(&mut manifest);
        let entity = ManifestEntity::new(board.to_string(), manifest);

        debug!(
            board = %board,
            version = entity.version,
            config_count = configs.len(),
            "saving manifest"
        );

        let mut query = String::from("BEGIN TRANSACTION;\n");
        query.push_str(&format!(
            "UPDATE {table} SET is_active = false WHERE board = $board AND is_active = true;\n",
            table = ManifestEntity::TABLE
        ));
        query.push_str(&format!(
            "CREATE {table} CONTENT $manifest;\n",
            table = ManifestEntity::TABLE
        ));
        for i in 0..configs.len() {
            query.push_str(&format!(
                "UPSERT type::thing('{table}', $key_{i}) CONTENT $cfg_{i};\n",
                table = DynamicConfigEntity::TABLE
            ));
        }
        query.push_str("COMMIT TRANSACTION;");

        let mut request = self
            .datastore
            .client()
            .query(query)
            .bind(("board", board.to_string()))
            .bind(("manifest", entity));
        for (i, config) in configs.iter().enumerate() {
            let cfg_entity = DynamicConfigEntity::from_config(config);
            request = request
                .bind((format!("key_{i}"), config.content_key.clone()))
                .bind((format!("cfg_{i}"), cfg_entity));
        }

        let response = request.await.map_err(|e| DbError::Query(e.to_string()))?;
        response.check().map_err(|e| DbError::Query(e.to_string()))?;

        Ok(configs)
    }
}
