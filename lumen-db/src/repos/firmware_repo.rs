//! Firmware repository

use std::sync::Arc;

use crate::datastore::Datastore;
use crate::entities::FirmwareEntity;
use crate::error::{DbError, DbResult};

pub struct FirmwareRepo {
    datastore: Arc<Datastore>,
}

impl FirmwareRepo {
    pub fn new(datastore: Arc<Datastore>) -> Self {
        Self { datastore }
    }

    /// Record an uploaded firmware binary.
    pub async fn add(&self, entity: FirmwareEntity) -> DbResult<()> {
        let query = format!("CREATE {} CONTENT $data", FirmwareEntity::TABLE);
        let response = self
            .datastore
            .client()
            .query(query)
            .bind(("data", entity))
            .await
            .map_err(|e| DbError::Query(e.to_string()))?;
        response.check().map_err(|e| DbError::Query(e.to_string()))?;
        Ok(())
    }

    /// Latest firmware record for a board.
    pub async fn latest(&self, board: &str) -> DbResult<Option<FirmwareEntity>> {
        let query = format!(
            "SELECT * FROM {} WHERE board = $board ORDER BY created_at DESC LIMIT 1",
            FirmwareEntity::TABLE
        );
        let mut response = self
            .datastore
            .client()
            .query(query)
            .bind(("board", board.to_string()))
            .await
            .map_err(|e| DbError::Query(e.to_string()))?;

        let result: Option<FirmwareEntity> = response
            .take(0)
            .map_err(|e| DbError::Query(e.to_string()))?;

        Ok(result)
    }
}
