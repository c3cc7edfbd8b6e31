//! First-run import.
//!
//! Seeds an empty store from the on-disk layout the boards were developed
//! with:
//!
//! ```text
//! ui_dir/<board>/screens.json        → board + active manifest
//! firmware_dir/<board>/firmware.bin  → storage copy + keyed digest + record
//! ```
//!
//! A populated store is left untouched.

use std::fs;
use std::path::Path;

use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::{info, warn};

use lumen_db::{Database, FirmwareEntity};

use crate::config::Config;

type HmacSha256 = Hmac<Sha256>;
type ImportResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Keyed digest over a firmware binary; the device recomputes this with the
/// pre-shared key before flashing.
pub fn compute_firmware_hmac(data: &[u8], secret_key: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret_key.as_bytes()).expect("HMAC accepts any key length");
    mac.update(data);
    hex::encode(mac.finalize().into_bytes())
}

/// Import boards, manifests, and firmware into an empty store.
pub async fn first_run_import(db: &Database, config: &Config) -> ImportResult {
    if !db.is_empty().await? {
        info!("store already populated, skipping import");
        return Ok(());
    }

    info!("first run, importing existing data");
    import_manifests(db, Path::new(&config.ui_dir)).await?;
    import_firmware(db, config).await?;
    info!("import complete");
    Ok(())
}

async fn import_manifests(db: &Database, ui_dir: &Path) -> ImportResult {
    if !ui_dir.exists() {
        return Ok(());
    }

    let mut board_dirs: Vec<_> = fs::read_dir(ui_dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    board_dirs.sort();

    for board_dir in board_dirs {
        let screens_path = board_dir.join("screens.json");
        if !screens_path.exists() {
            continue;
        }
        let Some(board_name) = board_dir.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        let raw = fs::read_to_string(&screens_path)?;
        let manifest: serde_json::Value = match serde_json::from_str(&raw) {
            Ok(m) => m,
            Err(e) => {
                warn!(board = %board_name, error = %e, "skipping unparseable manifest");
                continue;
            }
        };

        db.boards.create(board_name).await?;
        db.manifests.save(board_name, manifest).await?;
        info!(board = %board_name, "imported manifest");
    }

    Ok(())
}

async fn import_firmware(db: &Database, config: &Config) -> ImportResult {
    if config.firmware_dir.is_empty() {
        return Ok(());
    }
    if config.secret_key.is_empty() || config.version.is_empty() {
        warn!("firmware_dir set but secret_key/version missing, skipping firmware import");
        return Ok(());
    }

    let fw_dir = Path::new(&config.firmware_dir);
    if !fw_dir.exists() {
        return Ok(());
    }
    let storage = Path::new(&config.storage_dir).join("firmware");

    let mut board_dirs: Vec<_> = fs::read_dir(fw_dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    board_dirs.sort();

    for board_dir in board_dirs {
        let fw_file = board_dir.join("firmware.bin");
        if !fw_file.exists() {
            continue;
        }
        let Some(board_name) = board_dir.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        if !db.boards.exists(board_name).await? {
            db.boards.create(board_name).await?;
        }

        let dest_dir = storage.join(board_name);
        fs::create_dir_all(&dest_dir)?;
        let dest = dest_dir.join("firmware.bin");
        fs::copy(&fw_file, &dest)?;

        let data = fs::read(&dest)?;
        let hmac_hex = compute_firmware_hmac(&data, &config.secret_key);
        let rel_path = format!("{board_name}/firmware.bin");

        db.firmware
            .add(FirmwareEntity::new(
                board_name.to_string(),
                config.version.clone(),
                rel_path,
                data.len() as i64,
                hmac_hex,
            ))
            .await?;
        info!(board = %board_name, size = data.len(), "imported firmware");
    }

    Ok(())
}
