//! Manifest entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A versioned UI manifest belonging to one board.
///
/// History is append-only: saving a new manifest deactivates the previous
/// active row instead of touching it. At most one row per board is active.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntity {
    pub board: String,
    /// The manifest document, content keys already injected.
    pub manifest: Value,
    pub version: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl ManifestEntity {
    pub const TABLE: &'static str = "manifest";

    pub fn new(board: String, manifest: Value) -> Self {
        let version = manifest.get("version").and_then(Value::as_i64).unwrap_or(1);
        Self {
            board,
            manifest,
            version,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Number of screens in the manifest document.
    pub fn screen_count(&self) -> usize {
        self.manifest
            .get("screens")
            .and_then(Value::as_object)
            .map(|s| s.len())
            .unwrap_or(0)
    }
}
