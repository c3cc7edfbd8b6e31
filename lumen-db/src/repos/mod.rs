//! Repository implementations

mod board_repo;
mod dynamic_repo;
mod firmware_repo;
mod manifest_repo;

pub use board_repo::{BoardRepo, BoardSummary};
pub use dynamic_repo::{CachedContent, DynamicRepo};
pub use firmware_repo::FirmwareRepo;
pub use manifest_repo::ManifestRepo;

use std::sync::Arc;

use crate::datastore::Datastore;
use crate::error::DbResult;

/// Main entry point for storage operations.
pub struct Database {
    datastore: Arc<Datastore>,
    pub boards: BoardRepo,
    pub manifests: ManifestRepo,
    pub firmware: FirmwareRepo,
    pub dynamic: DynamicRepo,
}

impl Database {
    pub fn new(datastore: Arc<Datastore>) -> Self {
        Self {
            datastore: datastore.clone(),
            boards: BoardRepo::new(datastore.clone()),
            manifests: ManifestRepo::new(datastore.clone()),
            firmware: FirmwareRepo::new(datastore.clone()),
            dynamic: DynamicRepo::new(datastore),
        }
    }

    /// Apply schema definitions. Idempotent.
    pub async fn init_schema(&self) -> DbResult<()> {
        self.datastore.init_schema().await
    }

    /// Whether the store holds no boards yet (first-run detection).
    pub async fn is_empty(&self) -> DbResult<bool> {
        Ok(self.boards.list().await?.is_empty())
    }
}
