//! Item domain model.
//!
//! # Responsibility
//! - Define the canonical record shared by clipboard/notes views.
//! - Provide lifecycle helpers for soft-delete semantics.
//! - Define the explicit patch shape used by partial updates.
//!
//! # Invariants
//! - `id` is stable and never reused for another item.
//! - `is_deleted` is the source of truth for trash state.
//! - Tag strings are opaque values; the model never normalizes them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for every stored item.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
/// Ids are opaque strings: import paths accept foreign ids verbatim, while
/// [`Item::new`] mints UUIDv4 values for locally created items.
pub type ItemId = String;

/// Content classification assigned by the caller before insertion.
///
/// The store carries this value opaquely and never recomputes it; see
/// [`crate::detect`] for the collaborator that produces it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    /// Plain text with no recognized structure.
    #[default]
    Text,
    /// Phone number.
    Phone,
    /// Email address.
    Email,
    /// Web link.
    Link,
    /// Postal address or place reference.
    Location,
    /// Sensitive content that must stay redacted in display surfaces.
    Secure,
}

/// Coarse partition an item belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Captured clipboard history.
    #[default]
    Clipboard,
    /// User-authored notes.
    Notes,
}

/// Canonical record for one stored snippet plus its metadata.
///
/// Optional rendering fields (`display_content`, `html_content`, `title`)
/// are carried through unchanged; only `content` participates in sorting,
/// merging and length comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Stable opaque ID used for every lookup and upsert.
    pub id: ItemId,
    /// Raw plain-text body; source of truth for comparisons and merges.
    pub content: String,
    /// Redacted/alternate rendering used only for display.
    #[serde(default)]
    pub display_content: Option<String>,
    /// Rich-text rendering; never interpreted by the store.
    #[serde(default)]
    pub html_content: Option<String>,
    /// User-supplied short label. Presentation falls back to a content
    /// prefix when absent; that fallback is a UI concern, not a store rule.
    #[serde(default)]
    pub title: Option<String>,
    /// Serialized as `type` to match the external snapshot schema.
    #[serde(rename = "type", default)]
    pub kind: ItemType,
    /// Partition the item belongs to, stored verbatim.
    #[serde(default)]
    pub category: Category,
    /// Formatted, locale-rendered date-time string. Date sort must tolerate
    /// unparsable values by falling back to lexicographic `id` order.
    #[serde(default)]
    pub timestamp: String,
    /// Tag set, conventionally `#`-prefixed. Order is not meaningful.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Forces the item ahead of unpinned items in every sorted view.
    #[serde(default)]
    pub is_pinned: bool,
    /// Pure filter flag; no bearing on ordering or deletion.
    #[serde(default)]
    pub is_favorite: bool,
    /// Soft-delete tombstone; trashed items stay in storage.
    #[serde(default)]
    pub is_deleted: bool,
}

impl Item {
    /// Creates a new item with a freshly minted UUIDv4 id.
    ///
    /// # Invariants
    /// - Optional rendering fields start as `None`.
    /// - All flags start as `false`; the tag set starts empty.
    pub fn new(category: Category, content: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), category, content)
    }

    /// Creates a new item with a caller-provided stable id.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(id: ItemId, category: Category, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            display_content: None,
            html_content: None,
            title: None,
            kind: ItemType::Text,
            category,
            timestamp: String::new(),
            tags: Vec::new(),
            is_pinned: false,
            is_favorite: false,
            is_deleted: false,
        }
    }

    /// Marks this item as softly deleted (moved to trash).
    pub fn soft_delete(&mut self) {
        self.is_deleted = true;
    }

    /// Clears the soft-delete flag.
    pub fn restore(&mut self) {
        self.is_deleted = false;
    }

    /// Returns whether this item should appear in non-trash views.
    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }

    /// Returns the string used for alphabetical comparisons: the title when
    /// present, otherwise the raw content.
    pub fn sort_label(&self) -> &str {
        self.title.as_deref().unwrap_or(self.content.as_str())
    }
}

/// Explicit partial-update shape for [`Item`].
///
/// Every settable field is an `Option`; absent fields leave the item
/// untouched. This replaces duck-typed partial merges so a caller can never
/// clear a field by accident through absent-vs-null ambiguity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
    pub content: Option<String>,
    pub display_content: Option<String>,
    pub html_content: Option<String>,
    pub title: Option<String>,
    pub kind: Option<ItemType>,
    pub category: Option<Category>,
    pub timestamp: Option<String>,
    /// Full replacement tag set; new tags are registered additively into
    /// the vocabulary by the store.
    pub tags: Option<Vec<String>>,
    pub is_pinned: Option<bool>,
    pub is_favorite: Option<bool>,
}

impl ItemPatch {
    /// Applies the present fields onto `item`, leaving the rest unchanged.
    pub fn apply_to(&self, item: &mut Item) {
        if let Some(content) = &self.content {
            item.content = content.clone();
        }
        if let Some(display_content) = &self.display_content {
            item.display_content = Some(display_content.clone());
        }
        if let Some(html_content) = &self.html_content {
            item.html_content = Some(html_content.clone());
        }
        if let Some(title) = &self.title {
            item.title = Some(title.clone());
        }
        if let Some(kind) = self.kind {
            item.kind = kind;
        }
        if let Some(category) = self.category {
            item.category = category;
        }
        if let Some(timestamp) = &self.timestamp {
            item.timestamp = timestamp.clone();
        }
        if let Some(tags) = &self.tags {
            item.tags = dedup_tags(tags);
        }
        if let Some(is_pinned) = self.is_pinned {
            item.is_pinned = is_pinned;
        }
        if let Some(is_favorite) = self.is_favorite {
            item.is_favorite = is_favorite;
        }
    }
}

/// Deduplicates a tag list while preserving first-seen order.
///
/// Tags are compared as opaque strings; no casing or prefix normalization
/// is applied.
pub fn dedup_tags(tags: &[String]) -> Vec<String> {
    let mut seen = std::collections::BTreeSet::new();
    let mut unique = Vec::new();
    for tag in tags {
        if seen.insert(tag.as_str()) {
            unique.push(tag.clone());
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::{dedup_tags, Category, Item, ItemPatch, ItemType};

    #[test]
    fn new_item_starts_active_with_empty_metadata() {
        let item = Item::new(Category::Clipboard, "hello");
        assert!(!item.id.is_empty());
        assert!(item.is_active());
        assert!(item.tags.is_empty());
        assert_eq!(item.kind, ItemType::Text);
    }

    #[test]
    fn sort_label_prefers_title_over_content() {
        let mut item = Item::new(Category::Notes, "body text");
        assert_eq!(item.sort_label(), "body text");
        item.title = Some("Label".to_string());
        assert_eq!(item.sort_label(), "Label");
    }

    #[test]
    fn patch_applies_only_present_fields() {
        let mut item = Item::new(Category::Clipboard, "before");
        item.title = Some("keep me".to_string());

        let patch = ItemPatch {
            content: Some("after".to_string()),
            kind: Some(ItemType::Link),
            ..ItemPatch::default()
        };
        patch.apply_to(&mut item);

        assert_eq!(item.content, "after");
        assert_eq!(item.kind, ItemType::Link);
        assert_eq!(item.title.as_deref(), Some("keep me"));
    }

    #[test]
    fn patch_tags_are_deduplicated_without_normalization() {
        let mut item = Item::new(Category::Notes, "x");
        let patch = ItemPatch {
            tags: Some(vec![
                "#Work".to_string(),
                "#work".to_string(),
                "#Work".to_string(),
            ]),
            ..ItemPatch::default()
        };
        patch.apply_to(&mut item);
        // Case differences are distinct tags; exact duplicates collapse.
        assert_eq!(item.tags, vec!["#Work".to_string(), "#work".to_string()]);
    }

    #[test]
    fn dedup_tags_preserves_first_seen_order() {
        let tags = vec!["#b".to_string(), "#a".to_string(), "#b".to_string()];
        assert_eq!(dedup_tags(&tags), vec!["#b".to_string(), "#a".to_string()]);
    }
}
