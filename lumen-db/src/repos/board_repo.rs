//! Board repository

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::datastore::Datastore;
use crate::entities::{BoardEntity, ManifestEntity};
use crate::error::{DbError, DbResult};

/// Board listing row: name plus the screen count of the active manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSummary {
    pub name: String,
    pub screen_count: usize,
}

pub struct BoardRepo {
    datastore: Arc<Datastore>,
}

impl BoardRepo {
    pub fn new(datastore: Arc<Datastore>) -> Self {
        Self { datastore }
    }

    /// Create a new board. Fails if the name is taken.
    pub async fn create(&self, name: &str) -> DbResult<BoardEntity> {
        let entity = BoardEntity::new(name.to_string());

        let query = format!(
            "CREATE type::thing('{}', $name) CONTENT $data RETURN AFTER",
            BoardEntity::TABLE
        );
        let mut response = self
            .datastore
            .client()
            .query(query)
            .bind(("name", entity.name.clone()))
            .bind(("data", entity.clone()))
            .await
            .map_err(|e| DbError::Query(e.to_string()))?;

        let result: Option<BoardEntity> = response
            .take(0)
            .map_err(|_| DbError::AlreadyExists(format!("board '{name}'")))?;

        result.ok_or_else(|| DbError::AlreadyExists(format!("board '{name}'")))
    }

    /// Get a board by name.
    pub async fn get(&self, name: &str) -> DbResult<Option<BoardEntity>> {
        let query = format!(
            "SELECT * FROM {} WHERE name = $name LIMIT 1",
            BoardEntity::TABLE
        );
        let mut response = self
            .datastore
            .client()
            .query(query)
            .bind(("name", name.to_string()))
            .await
            .map_err(|e| DbError::Query(e.to_string()))?;

        let result: Option<BoardEntity> = response
            .take(0)
            .map_err(|e| DbError::Query(e.to_string()))?;

        Ok(result)
    }

    /// Check if a board exists.
    pub async fn exists(&self, name: &str) -> DbResult<bool> {
        Ok(self.get(name).await?.is_some())
    }

    /// List all boards, ordered by name.
    pub async fn list(&self) -> DbResult<Vec<BoardEntity>> {
        let query = format!("SELECT * FROM {} ORDER BY name ASC", BoardEntity::TABLE);
        let mut response = self
            .datastore
            .client()
            .query(query)
            .await
            .map_err(|e| DbError::Query(e.to_string()))?;

        let results: Vec<BoardEntity> = response
            .take(0)
            .map_err(|e| DbError::Query(e.to_string()))?;

        Ok(results)
    }

    /// List boards with the screen count of each board's active manifest.
    pub async fn list_summaries(&self) -> DbResult<Vec<BoardSummary>> {
        let boards = self.list().await?;
        let mut summaries = Vec::with_capacity(boards.len());
        for board in boards {
            let query = format!(
                "SELECT * FROM {} WHERE board = $board AND is_active = true LIMIT 1",
                ManifestEntity::TABLE
            );
            let mut response = self
                .datastore
                .client()
                .query(query)
                .bind(("board", board.name.clone()))
                .await
                .map_err(|e| DbError::Query(e.to_string()))?;

            let active: Option<ManifestEntity> = response
                .take(0)
                .map_err(|e| DbError::Query(e.to_string()))?;

            summaries.push(BoardSummary {
                name: board.name,
                screen_count: active.map(|m| m.screen_count()).unwrap_or(0),
            });
        }
        Ok(summaries)
    }
}
