//! Flat-JSON file persistence behind the store's operations.
//!
//! # Responsibility
//! - Save and load the snapshot contract as a single JSON blob on disk.
//! - Keep the persistence medium an implementation detail: callers only
//!   see [`ClipStore`] values going in and out.
//!
//! # Invariants
//! - Saves are write-then-rename: a failed save never truncates an
//!   existing vault file.
//! - Opening a missing file yields an empty store, not an error.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::Path;

use log::info;

use crate::store::{ClipStore, SnapshotError};

/// Result type for vault file APIs.
pub type StorageResult<T> = Result<T, StorageError>;

/// Persistence-layer failure for vault file reads/writes.
#[derive(Debug)]
pub enum StorageError {
    Io(io::Error),
    /// File content did not satisfy the snapshot contract.
    Snapshot(SnapshotError),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "vault file I/O failed: {err}"),
            Self::Snapshot(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Snapshot(err) => Some(err),
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<SnapshotError> for StorageError {
    fn from(value: SnapshotError) -> Self {
        Self::Snapshot(value)
    }
}

/// Writes the full store state to `path` as one JSON blob.
///
/// The payload lands in a sibling temp file first and is renamed over the
/// target, so interrupted saves leave the previous vault intact.
pub fn save_store(store: &ClipStore, path: &Path) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let staged = path.with_extension("tmp");
    fs::write(&staged, store.export_json())?;
    fs::rename(&staged, path)?;

    info!(
        "event=vault_saved module=storage items={} path={}",
        store.len(),
        path.display()
    );
    Ok(())
}

/// Loads a store from the JSON blob at `path`.
///
/// A missing file yields an empty store; an unreadable or malformed file
/// is surfaced as [`StorageError`].
pub fn open_store(path: &Path) -> StorageResult<ClipStore> {
    let payload = match fs::read_to_string(path) {
        Ok(payload) => payload,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            info!(
                "event=vault_missing module=storage path={} status=empty_store",
                path.display()
            );
            return Ok(ClipStore::new());
        }
        Err(err) => return Err(StorageError::Io(err)),
    };

    let mut store = ClipStore::new();
    let report = store.import(&payload)?;
    info!(
        "event=vault_opened module=storage items={} skipped={} path={}",
        store.len(),
        report.skipped,
        path.display()
    );
    Ok(store)
}
