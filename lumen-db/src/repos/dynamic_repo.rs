//! Dynamic content repository: config lookups and the cache store.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use lumen_core::DynamicConfig;

use crate::datastore::Datastore;
use crate::entities::{DynamicConfigEntity, DynamicContentEntity};
use crate::error::{DbError, DbResult};

/// A cache read: the stored text and tag, plus whether the entry's expiry
/// has passed. Expired entries are returned rather than hidden so a caller
/// may still serve stale text while triggering a recompute.
#[derive(Debug, Clone)]
pub struct CachedContent {
    pub text: String,
    pub etag: String,
    pub expired: bool,
}

pub struct DynamicRepo {
    datastore: Arc<Datastore>,
}

impl DynamicRepo {
    pub fn new(datastore: Arc<Datastore>) -> Self {
        Self { datastore }
    }

    /// Look up the dynamic config for a content key.
    pub async fn get_config(&self, content_key: &str) -> DbResult<Option<DynamicConfig>> {
        let query = format!(
            "SELECT * FROM {} WHERE content_key = $key LIMIT 1",
            DynamicConfigEntity::TABLE
        );
        let mut response = self
            .datastore
            .client()
            .query(query)
            .bind(("key", content_key.to_string()))
            .await
            .map_err(|e| DbError::Query(e.to_string()))?;

        let entity: Option<DynamicConfigEntity> = response
            .take(0)
            .map_err(|e| DbError::Query(e.to_string()))?;

        entity.map(DynamicConfigEntity::into_config).transpose()
    }

    /// Read the cached content for a key, if any.
    pub async fn get_cached(&self, content_key: &str) -> DbResult<Option<CachedContent>> {
        let query = format!(
            "SELECT * FROM {} WHERE content_key = $key LIMIT 1",
            DynamicContentEntity::TABLE
        );
        let mut response = self
            .datastore
            .client()
            .query(query)
            .bind(("key", content_key.to_string()))
            .await
            .map_err(|e| DbError::Query(e.to_string()))?;

        let entity: Option<DynamicContentEntity> = response
            .take(0)
            .map_err(|e| DbError::Query(e.to_string()))?;

        Ok(entity.map(|e| CachedContent {
            text: e.rendered_text,
            etag: e.etag,
            expired: Utc::now() > e.expires_at,
        }))
    }

    /// Store resolved text for a key with an absolute expiry `ttl_seconds`
    /// from now, deriving the revalidation tag from the text's digest.
    /// Overwrites any previous entry for the key; returns the stored tag.
    pub async fn set_cached(
        &self,
        content_key: &str,
        text: &str,
        ttl_seconds: i64,
    ) -> DbResult<String> {
        let etag = lumen_core::compute_etag(text);
        let entity = DynamicContentEntity::new(
            content_key.to_string(),
            text.to_string(),
            etag.clone(),
            ttl_seconds,
        );

        let query = format!(
            "UPSERT type::thing('{}', $key) CONTENT $data",
            DynamicContentEntity::TABLE
        );
        let response = self
            .datastore
            .client()
            .query(query)
            .bind(("key", content_key.to_string()))
            .bind(("data", entity))
            .await
            .map_err(|e| DbError::Query(e.to_string()))?;
        response.check().map_err(|e| DbError::Query(e.to_string()))?;

        debug!(key = %content_key, etag = %etag, ttl_seconds, "cached dynamic content");
        Ok(etag)
    }

    /// Force every cache entry's expiry into the past. Rows are kept, so
    /// stale reads can still serve text while a recompute is triggered.
    pub async fn invalidate_all(&self) -> DbResult<()> {
        let query = format!(
            "UPDATE {} SET expires_at = $now",
            DynamicContentEntity::TABLE
        );
        let response = self
            .datastore
            .client()
            .query(query)
            .bind(("now", Utc::now()))
            .await
            .map_err(|e| DbError::Query(e.to_string()))?;
        response.check().map_err(|e| DbError::Query(e.to_string()))?;

        debug!("invalidated all cached dynamic content");
        Ok(())
    }
}
