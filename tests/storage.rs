use medfind_drafts::drafts::{DraftKind, DraftStore, DraftStoreOptions};
use medfind_drafts::storage::{FileStorage, StorageBackend, StorageError};
use serde_json::json;
use std::sync::Arc;

fn options() -> DraftStoreOptions {
    DraftStoreOptions {
        autosave_enabled: false,
        ..DraftStoreOptions::default()
    }
}

#[tokio::test]
async fn test_file_storage_basic_operations() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path().join("data"));

    assert_eq!(storage.get("reports").await.unwrap(), None);

    storage.set("reports", "[1,2]").await.unwrap();
    assert_eq!(storage.get("reports").await.unwrap().as_deref(), Some("[1,2]"));
    assert!(storage.path_for("reports").exists());

    storage.set("reports", "[]").await.unwrap();
    assert_eq!(storage.get("reports").await.unwrap().as_deref(), Some("[]"));

    assert!(storage.remove("reports").await.unwrap());
    assert!(!storage.remove("reports").await.unwrap());
    assert_eq!(storage.get("reports").await.unwrap(), None);
}

#[tokio::test]
async fn test_file_storage_quota() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path()).with_quota(Some(4));

    storage.set("k", "1234").await.unwrap();
    let err = storage.set("k", "12345").await.unwrap_err();
    assert!(matches!(err, StorageError::QuotaExceeded { needed: 5, quota: 4 }));

    // The previous value survives a rejected write
    assert_eq!(storage.get("k").await.unwrap().as_deref(), Some("1234"));
}

#[tokio::test]
async fn test_file_storage_keys_stay_inside_root() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path());

    let path = storage.path_for("../escape");
    assert_eq!(path.parent().unwrap(), dir.path());

    assert!(matches!(storage.set("", "x").await, Err(StorageError::InvalidKey(_))));
}

#[tokio::test]
async fn test_drafts_survive_reopen_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(FileStorage::new(dir.path()));

    let id = {
        let store = DraftStore::open(storage.clone(), "reports", options()).await;
        store
            .save(json!({"pharmacy": "Central", "in_stock": true}), DraftKind::Report, None)
            .await
    };

    let reopened = DraftStore::open(storage.clone(), "reports", options()).await;
    assert_eq!(reopened.load(&id).await, Some(json!({"pharmacy": "Central", "in_stock": true})));

    let on_disk = std::fs::read_to_string(storage.path_for("reports")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&on_disk).unwrap();
    assert_eq!(parsed[0]["id"], json!(id));
    assert_eq!(parsed[0]["type"], json!("report"));
}

#[tokio::test]
async fn test_corrupted_file_falls_back_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(FileStorage::new(dir.path()));
    std::fs::write(storage.path_for("reports"), "not json at all").unwrap();

    let store = DraftStore::open(storage.clone(), "reports", options()).await;
    assert!(store.is_empty().await);
}
