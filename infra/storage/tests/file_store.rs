use jobchat_storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn values_survive_reopen() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested/store.json");

    {
        let store = FileStore::open(&path).unwrap();
        store.set("encryption_salt", "[1,2,3]").unwrap();
        store.set("security_log", "[]").unwrap();
    }

    let reopened = FileStore::open(&path).unwrap();
    assert_eq!(reopened.get("encryption_salt").unwrap().as_deref(), Some("[1,2,3]"));
    assert!(reopened.contains("security_log").unwrap());
    assert!(!reopened.contains("missing").unwrap());
}

#[test]
fn remove_is_idempotent_and_persisted() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("store.json");

    let store = FileStore::open(&path).unwrap();
    store.set("k", "v").unwrap();
    store.remove("k").unwrap();
    store.remove("k").unwrap();
    drop(store);

    let reopened = FileStore::open(&path).unwrap();
    assert_eq!(reopened.get("k").unwrap(), None);
}

#[test]
fn document_is_written_only_on_mutation() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("store.json");

    let store = FileStore::open(&path).unwrap();
    assert!(!path.exists());

    store.remove("never-set").unwrap();
    assert!(!path.exists(), "no-op removal must not create the document");

    store.set("k", "v").unwrap();
    assert!(path.exists());
}

#[test]
fn corrupt_document_is_reported() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("store.json");
    fs::write(&path, "{ not json").unwrap();

    let err = FileStore::open(&path).expect_err("corrupt document must fail");
    assert!(matches!(err, StorageError::Corrupt { .. }));
}

#[test]
fn orphaned_temp_files_are_purged_on_open() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("store.json");
    let orphan = temp.path().join("store.json.jctmp.999.0");
    let unrelated = temp.path().join("other.json");
    fs::write(&orphan, "partial").unwrap();
    fs::write(&unrelated, "{}").unwrap();

    let _store = FileStore::open(&path).unwrap();

    assert!(!orphan.exists());
    assert!(unrelated.exists());
}

#[test]
fn stores_are_usable_behind_arc_trait_objects() {
    let temp = TempDir::new().unwrap();
    let stores: Vec<Arc<dyn KeyValueStore>> = vec![
        Arc::new(MemoryStore::new()),
        Arc::new(FileStore::open(temp.path().join("store.json")).unwrap()),
    ];

    for store in stores {
        store.set("shared", "value").unwrap();
        assert_eq!(store.get("shared").unwrap().as_deref(), Some("value"));
    }
}
