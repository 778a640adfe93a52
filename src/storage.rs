//! Player save-slot persistence.
//!
//! A single JSON record at `<data_dir>/questifyPlayerData.json` holds the
//! progression fields `{hp, xp, level}` (plus `maxHp`, written for display
//! parity and ignored on load). Writes are atomic: temp file + rename under
//! an exclusive lock.
//!
//! The battle engine never sees this module. The shell loads a record,
//! hands a validated copy into encounters, and saves the adopted result -
//! dependency injection through the [`PlayerStore`] trait keeps the core
//! testable without a filesystem.

use fs2::FileExt;
use log::warn;
use serde::Deserialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::game::player::PlayerState;

/// File stem of the save slot.
pub const SAVE_SLOT: &str = "questifyPlayerData";

/// Errors from the persistence layer. All of them degrade to the fresh
/// default at the shell; nothing here is fatal.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persistence adapter owned by the presentation layer and invoked around
/// core calls.
pub trait PlayerStore {
    /// Load and validate the saved record. `None` means no usable record
    /// exists (missing, malformed, or non-numeric fields) and the caller
    /// should fall back to [`PlayerState::fresh`].
    fn load(&self) -> Option<PlayerState>;

    /// Persist the record.
    fn save(&self, player: &PlayerState) -> Result<(), StorageError>;

    /// Remove the slot, if present.
    fn reset(&self) -> Result<(), StorageError>;
}

/// Raw on-disk shape. Fields are accepted as any finite JSON number so a
/// fractional xp from an older save still loads; anything non-numeric fails
/// deserialization and discards the record. `maxHp` is derivable and ignored.
#[derive(Debug, Deserialize)]
struct SavedRecord {
    hp: f64,
    xp: f64,
    level: f64,
}

/// JSON-file implementation of [`PlayerStore`].
pub struct JsonPlayerStore {
    data_dir: PathBuf,
}

impl JsonPlayerStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        JsonPlayerStore {
            data_dir: data_dir.into(),
        }
    }

    pub fn slot_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", SAVE_SLOT))
    }
}

impl PlayerStore for JsonPlayerStore {
    fn load(&self) -> Option<PlayerState> {
        let path = self.slot_path();
        let raw = std::fs::read_to_string(&path).ok()?;
        let record: SavedRecord = match serde_json::from_str(&raw) {
            Ok(r) => r,
            Err(e) => {
                warn!("discarding corrupted save slot {}: {}", path.display(), e);
                let _ = std::fs::remove_file(&path);
                return None;
            }
        };
        if !(record.hp.is_finite() && record.xp.is_finite() && record.level.is_finite()) {
            warn!(
                "discarding save slot with non-finite fields: {}",
                path.display()
            );
            let _ = std::fs::remove_file(&path);
            return None;
        }
        let mut player = PlayerState {
            hp: record.hp as i32,
            max_hp: 0,
            xp: record.xp as i32,
            level: record.level.max(1.0) as u32,
        };
        // Recomputes max_hp, clamps, and revives a stored game-over.
        player.sanitize_loaded();
        Some(player)
    }

    fn save(&self, player: &PlayerState) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(player)?;
        write_json_atomic(&self.slot_path(), &json)?;
        Ok(())
    }

    fn reset(&self) -> Result<(), StorageError> {
        let path = self.slot_path();
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }
}

fn ensure_dir(path: &Path) {
    let _ = std::fs::create_dir_all(path);
}

/// Lock-then-rename write. The target is opened without truncation purely to
/// hold an exclusive advisory lock against concurrent writers; its contents
/// stay intact until the rename lands. The new record is staged in a fresh
/// temp file in the same directory, synced, and renamed over the target, so
/// readers see either the old record or the new one, never a torn write.
fn write_json_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    ensure_dir(path.parent().unwrap_or(Path::new(".")));
    // Take an exclusive lock on the target path (create if missing)
    let lock_file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .read(true)
        .write(true)
        .open(path)?;
    lock_file.lock_exclusive()?;
    let dir = path.parent().unwrap_or(Path::new("."));
    let base = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("save.json");
    let mut counter = 0u32;
    let tmp_path = loop {
        let cand = dir.join(format!(".{}.tmp-{}-{}", base, std::process::id(), counter));
        match OpenOptions::new().write(true).create_new(true).open(&cand) {
            Ok(mut tmp) => {
                tmp.write_all(content.as_bytes())?;
                let _ = tmp.flush();
                let _ = tmp.sync_all();
                break cand;
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                counter = counter.saturating_add(1);
                continue;
            }
            Err(e) => {
                return Err(e);
            }
        }
    };
    std::fs::rename(&tmp_path, path)?;
    if let Ok(dirf) = File::open(dir) {
        let _ = dirf.sync_all();
    }
    drop(lock_file);
    Ok(())
}
