//! Versioned snapshot import/export.
//!
//! # Responsibility
//! - Serialize the full store state (trash included) to the stable JSON
//!   snapshot contract.
//! - Restore state from a snapshot with upsert-by-id semantics.
//!
//! # Invariants
//! - Export/import round-trips losslessly.
//! - Import is all-or-nothing at the parse stage but lenient per item:
//!   one malformed array element never corrupts the rest of the import.
//! - Every tag on every incoming item is registered, replaced or new.

use std::error::Error;
use std::fmt::{Display, Formatter};

use chrono::Utc;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::item::Item;
use crate::store::ClipStore;

/// Snapshot schema version written by [`ClipStore::export`].
pub const SNAPSHOT_VERSION: u32 = 1;

/// Stable serialization contract for backup/restore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Schema version, currently `1`.
    pub version: u32,
    /// ISO-8601 export time.
    pub timestamp: String,
    /// Full item collection in physical order, trash included.
    pub items: Vec<Item>,
    /// Full tag vocabulary.
    pub tags: Vec<String>,
}

/// Result type for snapshot APIs.
pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Import failure surfaced to the caller instead of a panic.
///
/// Only parse-stage problems are errors; malformed individual items are
/// skipped and counted in [`ImportReport::skipped`].
#[derive(Debug)]
pub enum SnapshotError {
    /// Payload is not valid JSON.
    InvalidJson(serde_json::Error),
    /// Payload parsed but lacks an `items` array.
    MissingItems,
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidJson(err) => write!(f, "snapshot payload is not valid JSON: {err}"),
            Self::MissingItems => write!(f, "snapshot payload lacks an `items` array"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidJson(err) => Some(err),
            Self::MissingItems => None,
        }
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidJson(value)
    }
}

/// Per-item outcome counts for one import call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Items inserted at the head with a previously unknown id.
    pub inserted: usize,
    /// Items replaced in place, preserving physical position.
    pub replaced: usize,
    /// Array elements skipped for failing minimal validation.
    pub skipped: usize,
}

impl ClipStore {
    /// Produces a versioned snapshot of the full store state.
    pub fn export(&self) -> Snapshot {
        Snapshot {
            version: SNAPSHOT_VERSION,
            timestamp: Utc::now().to_rfc3339(),
            items: self.items().to_vec(),
            tags: self.list_tags(),
        }
    }

    /// Serializes the snapshot contract to a JSON string.
    pub fn export_json(&self) -> String {
        // A snapshot of plain strings and flags cannot fail to serialize.
        serde_json::to_string_pretty(&self.export()).unwrap_or_else(|_| String::from("{}"))
    }

    /// Imports a snapshot payload with upsert-by-id semantics.
    ///
    /// # Errors
    /// - [`SnapshotError::InvalidJson`] when the payload is not JSON.
    /// - [`SnapshotError::MissingItems`] when no `items` array is present.
    ///
    /// Both abort before any mutation. Individual array elements that fail
    /// minimal validation (deserializable item with a non-empty id) are
    /// skipped and counted; everything else is upserted independently.
    pub fn import(&mut self, payload: &str) -> SnapshotResult<ImportReport> {
        let value: Value = serde_json::from_str(payload)?;
        let Some(raw_items) = value.get("items").and_then(Value::as_array) else {
            return Err(SnapshotError::MissingItems);
        };
        let raw_items = raw_items.clone();

        if let Some(version) = value.get("version").and_then(Value::as_u64) {
            if version != u64::from(SNAPSHOT_VERSION) {
                warn!(
                    "event=snapshot_version_mismatch module=store found={} supported={}",
                    version, SNAPSHOT_VERSION
                );
            }
        }

        if let Some(tags) = value.get("tags").and_then(Value::as_array) {
            for tag in tags.iter().filter_map(Value::as_str) {
                self.vocabulary_mut().insert(tag.to_string());
            }
        }

        let mut report = ImportReport::default();
        for raw in raw_items {
            let Some(item) = decode_item(raw) else {
                report.skipped += 1;
                continue;
            };
            let tags = item.tags.clone();
            self.register_tags(&tags);
            match self.position_of(&item.id) {
                Some(index) => {
                    self.items_mut()[index] = item;
                    report.replaced += 1;
                }
                None => {
                    // New items land ahead of all pre-existing items, kept
                    // in payload order among themselves so an export/import
                    // round trip preserves physical order.
                    let head_offset = report.inserted.min(self.len());
                    self.items_mut().insert(head_offset, item);
                    report.inserted += 1;
                }
            }
        }

        debug!(
            "event=snapshot_imported module=store inserted={} replaced={} skipped={}",
            report.inserted, report.replaced, report.skipped
        );
        Ok(report)
    }
}

/// Minimal per-item validation boundary: the element must deserialize into
/// [`Item`] (serde defaults cover missing flags/tags) and carry a non-empty
/// id. Anything else is skipped rather than aborting the import.
fn decode_item(raw: Value) -> Option<Item> {
    let item: Item = serde_json::from_value(raw).ok()?;
    if item.id.trim().is_empty() {
        return None;
    }
    Some(item)
}
