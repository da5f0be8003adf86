//! JSON snapshots of a manager's associations.
//!
//! The manager itself holds no storage. A [`Snapshot`] is the serialisable form of
//! [`UidManager::entries`](crate::UidManager::entries), and [`save_snapshot`] /
//! [`load_snapshot`] move it to and from a file.
//!
//! # File layout
//!
//! ```json
//! {
//!   "exported_at": "2026-01-11T14:35:22.045Z",
//!   "entries": [
//!     { "key": "a", "uid": "aa97b177-9383-4934-8543-0f91a7a02836" }
//!   ]
//! }
//! ```

use crate::{UidMapError, UidMapResult};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use uidmap_uuid::Uid;

/// A timestamped, ordered copy of every association.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot<K> {
    pub exported_at: DateTime<Utc>,
    pub entries: Vec<SnapshotEntry<K>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEntry<K> {
    pub key: K,
    pub uid: Uid,
}

/// Writes `snapshot` to `path` as pretty-printed JSON.
///
/// The file is written to a temporary sibling first and then renamed over `path`, so a crash
/// mid-write leaves the previous snapshot in place. Missing parent directories are created.
///
/// # Errors
///
/// Returns [`UidMapError::Serialization`] if the snapshot cannot be encoded, or
/// [`UidMapError::FileWrite`] if any filesystem step fails.
pub fn save_snapshot<K: Serialize>(path: &Path, snapshot: &Snapshot<K>) -> UidMapResult<()> {
    let json = serde_json::to_string_pretty(snapshot).map_err(UidMapError::Serialization)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(UidMapError::FileWrite)?;
    }

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, json).map_err(UidMapError::FileWrite)?;
    fs::rename(&tmp_path, path).map_err(UidMapError::FileWrite)?;

    tracing::debug!(
        "saved {} associations to {}",
        snapshot.entries.len(),
        path.display()
    );
    Ok(())
}

/// Reads a snapshot from `path`. A missing file yields `Ok(None)`.
///
/// # Errors
///
/// Returns [`UidMapError::FileRead`] if the file exists but cannot be read, or
/// [`UidMapError::Deserialization`] if it is not a valid snapshot (including any identifier that
/// is not a version-4 UUID).
pub fn load_snapshot<K: DeserializeOwned>(path: &Path) -> UidMapResult<Option<Snapshot<K>>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(UidMapError::FileRead(e)),
    };

    serde_json::from_str(&contents)
        .map(Some)
        .map_err(UidMapError::Deserialization)
}
