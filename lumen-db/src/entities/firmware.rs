//! Firmware record entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata for an uploaded firmware binary. The binary itself lives on
/// disk under the storage directory; `hmac` is the keyed digest the device
/// verifies before flashing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirmwareEntity {
    pub board: String,
    pub version: String,
    /// Path of the stored binary, relative to the firmware storage root.
    pub filename: String,
    pub size: i64,
    pub hmac: String,
    pub created_at: DateTime<Utc>,
}

impl FirmwareEntity {
    pub const TABLE: &'static str = "firmware";

    pub fn new(board: String, version: String, filename: String, size: i64, hmac: String) -> Self {
        Self {
            board,
            version,
            filename,
            size,
            hmac,
            created_at: Utc::now(),
        }
    }
}
