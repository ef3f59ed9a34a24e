//! Durable JSON snapshots with atomic replace.
//!
//! Each store serializes its entire in-memory state on every persist. Writes
//! go to a sibling temp file first and land with a rename, so a crash mid-write
//! leaves the previous snapshot intact. A missing or corrupt snapshot is not
//! an error: the store starts empty and logs a warning.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use paperdeck_domain::{Folder, LibraryItemMeta, SwipeEvent};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// On-disk form of the library meta store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibrarySnapshot {
    pub version: u32,
    pub metas: Vec<LibraryItemMeta>,
    pub folders: Vec<Folder>,
}

/// On-disk form of the swipe ledger.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeSnapshot {
    pub saved_ids: Vec<String>,
    pub disliked_ids: Vec<String>,
    pub events: Vec<SwipeEvent>,
}

/// Read a snapshot, tolerating absence and corruption.
pub(crate) fn read_snapshot<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(err) if err.kind() == ErrorKind::NotFound => return None,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "snapshot unreadable, starting empty");
            return None;
        }
    };
    match serde_json::from_slice(&data) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "snapshot corrupt, starting empty");
            None
        }
    }
}

/// Serialize a snapshot and atomically replace the file at `path`.
pub(crate) fn write_snapshot<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_vec_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
