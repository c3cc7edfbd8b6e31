//! Board entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A device board. Identity-only: the unique name is the external
/// identifier; manifests and firmware reference it by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardEntity {
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl BoardEntity {
    pub const TABLE: &'static str = "board";

    pub fn new(name: String) -> Self {
        Self {
            name,
            created_at: Utc::now(),
        }
    }
}
