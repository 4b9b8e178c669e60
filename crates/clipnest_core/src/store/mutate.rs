//! Mutation and lifecycle operations.
//!
//! # Responsibility
//! - Change collection state under explicit id-addressed operations.
//! - Keep every operation idempotent against repeated identical calls
//!   where semantically sensible.
//!
//! # Invariants
//! - Unknown ids are silent no-ops; no other item is mutated.
//! - Soft delete and restore never change physical position.
//! - `delete_forever` is the only irreversible operation and does not
//!   touch the vocabulary.
//! - Pinning relocates the item to the head; unpinning leaves position
//!   unchanged.

use log::debug;

use crate::model::item::{dedup_tags, Item, ItemPatch};
use crate::store::ClipStore;

impl ClipStore {
    /// Inserts `item` at physical position 0 and registers its tags into
    /// the vocabulary.
    pub fn add(&mut self, mut item: Item) {
        item.tags = dedup_tags(&item.tags);
        let tags = item.tags.clone();
        self.register_tags(&tags);
        debug!(
            "event=item_added module=store id={} category={:?} tags={}",
            item.id,
            item.category,
            tags.len()
        );
        self.items_mut().insert(0, item);
    }

    /// Merges `patch` into the item with `id`; no-op when absent.
    ///
    /// When the patch replaces the tag set, the new tags are registered
    /// additively into the vocabulary.
    pub fn update(&mut self, id: &str, patch: &ItemPatch) {
        let Some(index) = self.position_of(id) else {
            return;
        };
        patch.apply_to(&mut self.items_mut()[index]);
        if let Some(tags) = &patch.tags {
            let tags = tags.clone();
            self.register_tags(&tags);
        }
    }

    /// Sets the soft-delete flag on every resolvable id. Returns the
    /// number of items actually flagged; stale ids do not count.
    pub fn soft_delete(&mut self, ids: &[&str]) -> usize {
        let affected = self.set_flag(ids, |item| item.soft_delete());
        debug!("event=items_trashed module=store count={affected}");
        affected
    }

    /// Clears the soft-delete flag on every resolvable id. Returns the
    /// number of items actually flagged.
    pub fn restore(&mut self, ids: &[&str]) -> usize {
        self.set_flag(ids, |item| item.restore())
    }

    /// Physically removes every resolvable id. Irreversible; the
    /// vocabulary is not affected. Returns the number of items removed.
    pub fn delete_forever(&mut self, ids: &[&str]) -> usize {
        let before = self.len();
        self.items_mut()
            .retain(|item| !ids.contains(&item.id.as_str()));
        let removed = before - self.len();
        debug!("event=items_purged module=store count={removed}");
        removed
    }

    /// Sets `is_favorite` explicitly (not a toggle) so a bulk call never
    /// un-favorites already-favorited members. Returns the number of items
    /// touched.
    pub fn set_favorite(&mut self, ids: &[&str], is_favorite: bool) -> usize {
        self.set_flag(ids, |item| item.is_favorite = is_favorite)
    }

    /// Single-item convenience that flips the current favorite flag.
    pub fn toggle_favorite(&mut self, id: &str) {
        if let Some(index) = self.position_of(id) {
            let item = &mut self.items_mut()[index];
            item.is_favorite = !item.is_favorite;
        }
    }

    /// Sets the pin flag. Pinning relocates the item to physical position
    /// 0, so consecutive pins stack most-recent first; unpinning sets the
    /// flag but leaves the position unchanged.
    pub fn pin(&mut self, id: &str, is_pinned: bool) {
        let Some(index) = self.position_of(id) else {
            return;
        };
        if is_pinned {
            let mut item = self.items_mut().remove(index);
            item.is_pinned = true;
            self.items_mut().insert(0, item);
        } else {
            self.items_mut()[index].is_pinned = false;
        }
    }

    /// Moves the dragged item to the target item's current index.
    ///
    /// No-op when either id is absent or when both ids are equal; state is
    /// never corrupted by a stale drag.
    pub fn reorder(&mut self, dragged_id: &str, target_id: &str) {
        if dragged_id == target_id {
            return;
        }
        let Some(from) = self.position_of(dragged_id) else {
            return;
        };
        if self.position_of(target_id).is_none() {
            return;
        }
        let item = self.items_mut().remove(from);
        // Target index is resolved after removal so the dragged item lands
        // exactly at the target's position in the resulting sequence.
        let Some(to) = self.position_of(target_id) else {
            // Unreachable: target was present and distinct from dragged.
            let back = from.min(self.len());
            self.items_mut().insert(back, item);
            return;
        };
        self.items_mut().insert(to, item);
    }

    fn set_flag(&mut self, ids: &[&str], mut apply: impl FnMut(&mut Item)) -> usize {
        let mut affected = 0;
        for item in self.items_mut() {
            if ids.contains(&item.id.as_str()) {
                apply(item);
                affected += 1;
            }
        }
        affected
    }
}
