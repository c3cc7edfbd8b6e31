//! SurrealDB connection handle.
//!
//! Thin wrapper owning the connection; repositories borrow the client for
//! each query. The endpoint string selects the engine: `mem://` for the
//! embedded in-memory store (tests, first-run trials), `rocksdb://path` or a
//! remote `ws://` endpoint in production.

use surrealdb::engine::any::{connect, Any};
use surrealdb::Surreal;

use crate::error::{DbError, DbResult};

/// Shared datastore handle.
pub struct Datastore {
    db: Surreal<Any>,
}

impl Datastore {
    /// Connect to the given endpoint and select the Lumen namespace.
    pub async fn connect(endpoint: &str) -> DbResult<Self> {
        let db = connect(endpoint).await?;
        db.use_ns("lumen").use_db("lumen").await?;
        Ok(Self { db })
    }

    /// Apply the schema definitions. Idempotent.
    pub async fn init_schema(&self) -> DbResult<()> {
        self.db
            .query(crate::schema::LUMEN_SCHEMA)
            .await
            .map_err(|e| DbError::Schema(e.to_string()))?;
        Ok(())
    }

    /// Borrow the underlying client.
    pub fn client(&self) -> &Surreal<Any> {
        &self.db
    }
}
