use clipnest_core::{open_store, save_store, Category, ClipStore, Item, StorageError};

fn item(id: &str, content: &str) -> Item {
    Item::with_id(id.to_string(), Category::Notes, content)
}

#[test]
fn save_then_open_round_trips_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vault.json");

    let mut store = ClipStore::new();
    let mut tagged = item("a", "persisted body");
    tagged.tags = vec!["#saved".to_string()];
    store.add(tagged);
    store.add(item("b", "second"));
    store.soft_delete(&["b"]);

    save_store(&store, &path).unwrap();
    let reopened = open_store(&path).unwrap();

    assert_eq!(reopened.items(), store.items());
    assert_eq!(reopened.list_tags(), store.list_tags());
    assert_eq!(reopened.list_trash().len(), 1);
}

#[test]
fn open_missing_file_yields_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir.path().join("nonexistent.json")).unwrap();
    assert!(store.is_empty());
}

#[test]
fn open_malformed_file_surfaces_snapshot_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vault.json");
    std::fs::write(&path, "{definitely not json").unwrap();

    let err = open_store(&path).unwrap_err();
    assert!(matches!(err, StorageError::Snapshot(_)));
}

#[test]
fn save_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/deep/vault.json");

    save_store(&ClipStore::new(), &path).unwrap();
    assert!(path.exists());
}

#[test]
fn save_replaces_previous_vault_atomically() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vault.json");

    let mut store = ClipStore::new();
    store.add(item("v1", "first version"));
    save_store(&store, &path).unwrap();

    store.add(item("v2", "second version"));
    save_store(&store, &path).unwrap();

    let reopened = open_store(&path).unwrap();
    assert_eq!(reopened.len(), 2);
    // No staging leftovers next to the vault.
    assert!(!path.with_extension("tmp").exists());
}
