//! Query and sort engine over the item collection.
//!
//! # Responsibility
//! - Produce filtered, ordered views without mutating the collection.
//! - Keep sorting a strict, deterministic total order.
//!
//! # Invariants
//! - Pinned items precede unpinned items for every sort key and direction;
//!   the pin check is evaluated before the direction flip.
//! - Date sort never fails on unparsable timestamps: parse status is part
//!   of the key, so parsable items order by instant while unparsable items
//!   order by lexicographic id after them as a group. A pairwise-only id
//!   fallback would be intransitive once parsable and unparsable values
//!   mix, and the comparator must stay a strict weak ordering.
//! - Equal primary keys are tie-broken by id inside the directional
//!   comparison, so repeated calls against an unchanged collection always
//!   return the same sequence.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::model::item::Item;
use crate::store::ClipStore;

/// Sort key for active-item listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Physical ("manual") order; head of the backing sequence first under
    /// the default descending direction.
    #[default]
    Custom,
    /// Parsed item timestamp; unparsable values group after parsable ones
    /// and order by id among themselves.
    Date,
    /// Character count of `content`.
    Length,
    /// Case-insensitive title-or-content comparison.
    Alphabetical,
}

/// Sort direction applied after the key comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    /// Raw key comparison.
    Asc,
    /// Inverted key comparison. Pin priority is unaffected.
    #[default]
    Desc,
}

impl ClipStore {
    /// Lists all non-deleted items sorted by `key` and `direction`.
    pub fn list_active(&self, key: SortKey, direction: SortDirection) -> Vec<&Item> {
        let mut entries: Vec<SortEntry<'_>> = self
            .items()
            .iter()
            .enumerate()
            .filter(|(_, item)| item.is_active())
            .map(|(index, item)| SortEntry {
                index,
                item,
                // Parsed once per entry so the date comparator stays a
                // consistent total order across every pairwise call.
                parsed: match key {
                    SortKey::Date => parse_timestamp(&item.timestamp),
                    _ => None,
                },
            })
            .collect();
        entries.sort_by(|a, b| compare_entries(a, b, key, direction));
        entries.into_iter().map(|entry| entry.item).collect()
    }

    /// Lists trashed items in physical order.
    pub fn list_trash(&self) -> Vec<&Item> {
        self.items()
            .iter()
            .filter(|item| item.is_deleted)
            .collect()
    }

    /// Lists non-deleted favorites in physical order.
    pub fn list_favorites(&self) -> Vec<&Item> {
        self.items()
            .iter()
            .filter(|item| item.is_favorite && item.is_active())
            .collect()
    }

    /// Lists non-deleted items carrying `tag` (exact string match).
    pub fn list_by_tag(&self, tag: &str) -> Vec<&Item> {
        self.items()
            .iter()
            .filter(|item| item.is_active() && item.tags.iter().any(|t| t == tag))
            .collect()
    }

    /// Lists every known tag: the persistent vocabulary unioned with tags
    /// observed on any item, trashed items included. Sorted and
    /// duplicate-free.
    pub fn list_tags(&self) -> Vec<String> {
        let mut all: std::collections::BTreeSet<String> = self.vocabulary().clone();
        for item in self.items() {
            for tag in &item.tags {
                all.insert(tag.clone());
            }
        }
        all.into_iter().collect()
    }
}

/// One active item staged for sorting, with its pre-parsed date key.
struct SortEntry<'a> {
    index: usize,
    item: &'a Item,
    parsed: Option<NaiveDateTime>,
}

/// Compares two staged entries under the sort contract.
fn compare_entries(
    a: &SortEntry<'_>,
    b: &SortEntry<'_>,
    key: SortKey,
    direction: SortDirection,
) -> Ordering {
    let (index_a, item_a) = (a.index, a.item);
    let (index_b, item_b) = (b.index, b.item);

    // Pin priority is decided before the direction flip so it can never be
    // inverted by choosing ascending order.
    let pinned = item_b.is_pinned.cmp(&item_a.is_pinned);
    if pinned != Ordering::Equal {
        return pinned;
    }

    let by_key = match key {
        // Smaller physical index means closer to the head, which counts as
        // "greater" so the default descending direction shows head first.
        SortKey::Custom => index_b.cmp(&index_a),
        SortKey::Date => match (a.parsed, b.parsed) {
            (Some(at), Some(bt)) => at.cmp(&bt),
            // Parsable values come first as a group; a pairwise id
            // fallback against parsable neighbors would be intransitive.
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => item_a.id.cmp(&item_b.id),
        },
        SortKey::Length => item_a
            .content
            .chars()
            .count()
            .cmp(&item_b.content.chars().count()),
        SortKey::Alphabetical => item_a
            .sort_label()
            .to_lowercase()
            .cmp(&item_b.sort_label().to_lowercase()),
    };

    let ordered = by_key.then_with(|| item_a.id.cmp(&item_b.id));
    match direction {
        SortDirection::Asc => ordered,
        SortDirection::Desc => ordered.reverse(),
    }
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y, %I:%M:%S %p",
    "%m/%d/%Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];

/// Best-effort parse of a formatted, locale-rendered timestamp string.
///
/// Returns `None` for anything unrecognized; the date sort then falls back
/// to id comparison rather than treating values as equal.
pub(crate) fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.naive_utc());
    }

    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(parsed);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, format) {
            return parsed.and_hms_opt(0, 0, 0);
        }
    }

    None
}
