//! Domain model for stored clips and notes.
//!
//! # Responsibility
//! - Define the canonical item record owned by the clip store.
//! - Keep one storage shape for every content kind and category.
//!
//! # Invariants
//! - Every item is identified by a stable, opaque `id` string.
//! - Deletion is represented by soft-delete tombstones, not hard delete.

pub mod item;
