//! Core domain logic for ClipNest, a personal clip and note manager.
//! This crate is the single source of truth for collection invariants:
//! ordering, tagging, soft delete, and the snapshot contract.

pub mod detect;
pub mod logging;
pub mod model;
pub mod storage;
pub mod store;
pub mod transform;

pub use detect::{classify, detect_matches, TypeMatch};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::item::{Category, Item, ItemId, ItemPatch, ItemType};
pub use storage::{open_store, save_store, StorageError, StorageResult};
pub use store::{
    ClipStore, ImportReport, Snapshot, SnapshotError, SortDirection, SortKey, MERGE_MARKER_TAG,
    SNAPSHOT_VERSION,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
