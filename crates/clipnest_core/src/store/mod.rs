//! Clip store: the canonical owner of items and the tag vocabulary.
//!
//! # Responsibility
//! - Own the backing item sequence and the persistent tag vocabulary.
//! - Expose every documented query, mutation, tagging and snapshot
//!   operation as methods on [`ClipStore`].
//!
//! # Invariants
//! - Physical order of the backing sequence is meaningful: index 0 is the
//!   head ("most recently added"); new items are prepended.
//! - The vocabulary is a superset of tags currently present on items; tags
//!   may be declared without any item carrying them.
//! - Unknown ids are tolerated as silent no-ops so bulk operations stay
//!   robust against partially stale id lists.
//! - The store is single-writer: all mutations take `&mut self` and there
//!   is no interior mutability, so a reader always observes either the full
//!   pre- or full post-state of a batch call.

use std::collections::BTreeSet;

use crate::model::item::Item;

mod mutate;
mod query;
mod snapshot;
mod tags;

pub use query::{SortDirection, SortKey};
pub use snapshot::{ImportReport, Snapshot, SnapshotError, SnapshotResult, SNAPSHOT_VERSION};
pub use tags::MERGE_MARKER_TAG;

/// Canonical collection of clip/note items plus the tag vocabulary.
///
/// Constructed once by the composition root and passed by reference to all
/// callers; there is deliberately no global instance.
#[derive(Debug, Default)]
pub struct ClipStore {
    /// Backing sequence in physical ("custom") order, head first.
    items: Vec<Item>,
    /// Declared tag universe, kept sorted and duplicate-free.
    vocabulary: BTreeSet<String>,
}

impl ClipStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up one item by id, including trashed items.
    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Returns the total number of stored items, trash included.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns whether the store holds no items at all.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the backing sequence in physical order, trash included.
    ///
    /// Exposed read-only; mutation goes through the documented operations.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub(crate) fn items_mut(&mut self) -> &mut Vec<Item> {
        &mut self.items
    }

    pub(crate) fn vocabulary(&self) -> &BTreeSet<String> {
        &self.vocabulary
    }

    pub(crate) fn vocabulary_mut(&mut self) -> &mut BTreeSet<String> {
        &mut self.vocabulary
    }

    /// Finds the physical index of an item by id.
    pub(crate) fn position_of(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Registers tags into the vocabulary. Registration is additive: it
    /// never removes entries no longer referenced by any item.
    pub(crate) fn register_tags<'a, I>(&mut self, tags: I)
    where
        I: IntoIterator<Item = &'a String>,
    {
        for tag in tags {
            self.vocabulary.insert(tag.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ClipStore;
    use crate::model::item::{Category, Item};

    #[test]
    fn empty_store_resolves_nothing() {
        let store = ClipStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn get_resolves_trashed_items_too() {
        let mut store = ClipStore::new();
        let mut item = Item::with_id("a".to_string(), Category::Clipboard, "x");
        item.is_deleted = true;
        store.add(item);
        assert!(store.get("a").is_some());
    }
}
