//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `clipnest_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use clipnest_core::{Category, ClipStore, Item, SortDirection, SortKey};

fn main() {
    println!("clipnest_core ping={}", clipnest_core::ping());
    println!("clipnest_core version={}", clipnest_core::core_version());

    // Tiny end-to-end probe: one item in, one item listed.
    let mut store = ClipStore::new();
    store.add(Item::new(Category::Clipboard, "smoke test clip"));
    let active = store.list_active(SortKey::Custom, SortDirection::Desc);
    println!("clipnest_core smoke_items={}", active.len());
}
