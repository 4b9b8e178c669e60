//! Merge and tag taxonomy management.
//!
//! # Responsibility
//! - Derive merged items from existing content without destroying sources.
//! - Manage the vocabulary/item relationship for bulk tag operations.
//!
//! # Invariants
//! - Tag strings are opaque: no casing or `#`-prefix normalization, and no
//!   input can make these operations panic.
//! - `remove_tags` is the only operation that is destructive at the
//!   vocabulary level; it also strips the tags from trashed items.
//! - Registration elsewhere is additive only.

use log::debug;

use crate::model::item::{dedup_tags, Item, ItemId};
use crate::store::ClipStore;

/// Marker tag attached to every item produced by [`ClipStore::merge`].
pub const MERGE_MARKER_TAG: &str = "#merged";

/// Separator between source contents in a merged item.
const MERGE_SEPARATOR: &str = "\n\n";

impl ClipStore {
    /// Derives a new item from the given sources and inserts it at the
    /// head. Sources are left untouched.
    ///
    /// Sources are taken in current physical order, not input order; the
    /// merged content joins them with a blank line and the category is
    /// inherited from the first source by physical order. Returns the new
    /// item's id, or `None` when fewer than two ids resolve.
    pub fn merge(&mut self, ids: &[&str]) -> Option<ItemId> {
        let mut sources: Vec<&Item> = self
            .items()
            .iter()
            .filter(|item| ids.contains(&item.id.as_str()))
            .collect();
        if sources.len() < 2 {
            return None;
        }
        // `items()` iterates in physical order already; the explicit sort
        // keeps the contract obvious and cheap.
        sources.sort_by_key(|item| self.position_of(&item.id));

        let content = sources
            .iter()
            .map(|item| item.content.as_str())
            .collect::<Vec<_>>()
            .join(MERGE_SEPARATOR);
        let category = sources[0].category;

        let mut merged = Item::new(category, content);
        merged.tags = vec![MERGE_MARKER_TAG.to_string()];
        merged.timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let merged_id = merged.id.clone();
        debug!(
            "event=items_merged module=store sources={} merged_id={}",
            sources.len(),
            merged_id
        );
        self.add(merged);
        Some(merged_id)
    }

    /// Unions `tags` into each resolvable item's tag set (deduplicated)
    /// and registers them into the vocabulary.
    pub fn add_tags_to_items(&mut self, ids: &[&str], tags: &[String]) {
        self.register_tags(tags);
        for item in self.items_mut() {
            if ids.contains(&item.id.as_str()) {
                let mut combined = item.tags.clone();
                combined.extend(tags.iter().cloned());
                item.tags = dedup_tags(&combined);
            }
        }
    }

    /// Unconditionally overwrites each resolvable item's tag set with
    /// `tags` (no union) and registers the new tags.
    pub fn replace_tags_for_items(&mut self, ids: &[&str], tags: &[String]) {
        self.register_tags(tags);
        let replacement = dedup_tags(tags);
        for item in self.items_mut() {
            if ids.contains(&item.id.as_str()) {
                item.tags = replacement.clone();
            }
        }
    }

    /// Removes `tags` from the vocabulary and strips them from every item
    /// carrying them, trashed items included.
    pub fn remove_tags(&mut self, tags: &[String]) {
        for tag in tags {
            self.vocabulary_mut().remove(tag);
        }
        for item in self.items_mut() {
            item.tags.retain(|tag| !tags.contains(tag));
        }
        debug!("event=tags_removed module=store count={}", tags.len());
    }

    /// Replaces every occurrence of `old_tags` with `new_tag` on items
    /// carrying any of them, deduplicating against each item's remaining
    /// tags. The vocabulary drops `old_tags` and gains `new_tag`.
    pub fn merge_tags(&mut self, old_tags: &[String], new_tag: &str) {
        for tag in old_tags {
            self.vocabulary_mut().remove(tag);
        }
        self.vocabulary_mut().insert(new_tag.to_string());

        for item in self.items_mut() {
            if !item.tags.iter().any(|tag| old_tags.contains(tag)) {
                continue;
            }
            let rewritten: Vec<String> = item
                .tags
                .iter()
                .map(|tag| {
                    if old_tags.contains(tag) {
                        new_tag.to_string()
                    } else {
                        tag.clone()
                    }
                })
                .collect();
            item.tags = dedup_tags(&rewritten);
        }
    }
}
