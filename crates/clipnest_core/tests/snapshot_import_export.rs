use clipnest_core::{
    Category, ClipStore, Item, SnapshotError, SortDirection, SortKey, SNAPSHOT_VERSION,
};

fn item(id: &str, content: &str) -> Item {
    Item::with_id(id.to_string(), Category::Clipboard, content)
}

fn populated_store() -> ClipStore {
    let mut store = ClipStore::new();
    let mut trashed = item("trashed", "kept in snapshot");
    trashed.tags = vec!["#t".to_string()];
    store.add(trashed);
    store.soft_delete(&["trashed"]);

    let mut favorite = item("fav", "favorite body");
    favorite.is_favorite = true;
    favorite.title = Some("Fav".to_string());
    store.add(favorite);
    store
}

#[test]
fn export_writes_versioned_snapshot_with_trash_and_vocabulary() {
    let store = populated_store();
    let snapshot = store.export();

    assert_eq!(snapshot.version, SNAPSHOT_VERSION);
    assert!(!snapshot.timestamp.is_empty());
    assert_eq!(snapshot.items.len(), 2, "trash is included");
    assert!(snapshot.tags.contains(&"#t".to_string()));
}

#[test]
fn export_import_round_trips_losslessly() {
    let original = populated_store();
    let payload = original.export_json();

    let mut restored = ClipStore::new();
    let report = restored.import(&payload).expect("round trip import");
    assert_eq!(report.inserted, 2);
    assert_eq!(report.replaced, 0);
    assert_eq!(report.skipped, 0);

    assert_eq!(restored.items(), original.items());
    assert_eq!(restored.list_tags(), original.list_tags());
}

#[test]
fn import_replaces_existing_ids_in_place() {
    let mut store = ClipStore::new();
    store.add(item("keep", "untouched"));
    store.add(item("target", "old content"));
    // Physical order: [target, keep].

    let mut replacement = item("target", "new content");
    replacement.tags = vec!["#incoming".to_string()];
    let payload = serde_json::json!({
        "version": 1,
        "timestamp": "2024-01-01T00:00:00Z",
        "items": [serde_json::to_value(&replacement).unwrap()],
        "tags": [],
    })
    .to_string();

    let active_before = store.list_active(SortKey::Custom, SortDirection::Desc).len();
    let report = store.import(&payload).unwrap();
    assert_eq!(report.replaced, 1);
    assert_eq!(report.inserted, 0);

    // Same total count, same physical position, updated body.
    assert_eq!(
        store.list_active(SortKey::Custom, SortDirection::Desc).len(),
        active_before
    );
    assert_eq!(store.items()[0].id, "target");
    assert_eq!(store.items()[0].content, "new content");
    assert!(store.list_tags().contains(&"#incoming".to_string()));
}

#[test]
fn import_inserts_unknown_ids_at_the_head() {
    let mut store = ClipStore::new();
    store.add(item("existing", "old"));

    let payload = serde_json::json!({
        "version": 1,
        "timestamp": "2024-01-01T00:00:00Z",
        "items": [
            {"id": "new-1", "content": "one"},
            {"id": "new-2", "content": "two"},
        ],
        "tags": [],
    })
    .to_string();

    let report = store.import(&payload).unwrap();
    assert_eq!(report.inserted, 2);

    let ids: Vec<&str> = store.items().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["new-1", "new-2", "existing"]);
}

#[test]
fn import_registers_payload_tags_into_vocabulary() {
    let mut store = ClipStore::new();
    let payload = serde_json::json!({
        "version": 1,
        "timestamp": "2024-01-01T00:00:00Z",
        "items": [],
        "tags": ["#declared", "#unused"],
    })
    .to_string();

    store.import(&payload).unwrap();
    assert_eq!(
        store.list_tags(),
        vec!["#declared".to_string(), "#unused".to_string()]
    );
}

#[test]
fn import_rejects_payloads_that_are_not_json() {
    let mut store = ClipStore::new();
    let err = store.import("{not json").unwrap_err();
    assert!(matches!(err, SnapshotError::InvalidJson(_)));
    assert!(store.is_empty());
}

#[test]
fn import_rejects_payloads_without_items_array_before_any_mutation() {
    let mut store = ClipStore::new();
    let payload = serde_json::json!({
        "version": 1,
        "timestamp": "2024-01-01T00:00:00Z",
        "tags": ["#should-not-register"],
    })
    .to_string();

    let err = store.import(&payload).unwrap_err();
    assert!(matches!(err, SnapshotError::MissingItems));
    assert!(store.list_tags().is_empty(), "aborted import must not mutate");
}

#[test]
fn import_skips_malformed_items_without_corrupting_the_rest() {
    let mut store = ClipStore::new();
    let payload = serde_json::json!({
        "version": 1,
        "timestamp": "2024-01-01T00:00:00Z",
        "items": [
            {"id": "good", "content": "fine"},
            {"content": "missing id"},
            {"id": "   ", "content": "blank id"},
            "not even an object",
            {"id": "also-good", "content": "fine too", "tags": ["#from-item"]},
        ],
        "tags": [],
    })
    .to_string();

    let report = store.import(&payload).unwrap();
    assert_eq!(report.inserted, 2);
    assert_eq!(report.skipped, 3);
    assert!(store.get("good").is_some());
    assert!(store.get("also-good").is_some());
    assert!(store.list_tags().contains(&"#from-item".to_string()));
}

#[test]
fn import_accepts_unknown_versions_leniently() {
    let mut store = ClipStore::new();
    let payload = serde_json::json!({
        "version": 99,
        "timestamp": "2024-01-01T00:00:00Z",
        "items": [{"id": "x", "content": "body"}],
        "tags": [],
    })
    .to_string();

    let report = store.import(&payload).unwrap();
    assert_eq!(report.inserted, 1);
}
