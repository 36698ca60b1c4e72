use medfind_drafts::constants::MAX_DRAFT_TIMESTAMP;
use medfind_drafts::drafts::{export_file_name, DraftKind, DraftStore, DraftStoreOptions};
use medfind_drafts::storage::MemoryStorage;
use serde_json::json;
use std::sync::Arc;

async fn open_store(namespace: &str, max_drafts: usize) -> DraftStore {
    let options = DraftStoreOptions {
        max_drafts,
        autosave_enabled: false,
        ..DraftStoreOptions::default()
    };
    DraftStore::open(Arc::new(MemoryStorage::new()), namespace, options).await
}

#[tokio::test]
async fn test_export_then_import_round_trips() {
    let store = open_store("reports", 10).await;
    store.save(json!({"medicine": "insulin"}), DraftKind::Report, Some("Insulin".to_string())).await;
    store.save(json!({"q": "ibuprofen", "radius": 3}), DraftKind::Search, None).await;

    let before = store.drafts().await;
    let blob = store.export().await;

    // Import into a fresh store
    let other = open_store("reports", 10).await;
    assert!(other.import_str(&blob.contents).await);
    assert_eq!(other.drafts().await, before);

    // Import over the same store after mutating it
    store.clear().await;
    assert!(store.import_str(&blob.contents).await);
    assert_eq!(store.drafts().await, before);
}

#[tokio::test]
async fn test_export_blob_shape() {
    let store = open_store("search-drafts", 10).await;
    store.save(json!(1), DraftKind::Form, None).await;

    let blob = store.export().await;
    assert_eq!(blob.file_name, export_file_name("search-drafts"));
    assert!(blob.file_name.starts_with("search-drafts_drafts_"));
    assert!(blob.file_name.ends_with(".json"));

    let parsed: serde_json::Value = serde_json::from_str(&blob.contents).unwrap();
    let records = parsed.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["type"], json!("form"));
    assert!(records[0].get("title").is_none());
}

#[tokio::test]
async fn test_import_non_array_leaves_state_unchanged() {
    let store = open_store("reports", 10).await;
    let id = store.save(json!("keep me"), DraftKind::Report, None).await;
    let before = store.drafts().await;

    for payload in [r#"{"drafts": []}"#, r#""a string""#, "42", "null", "{broken"] {
        assert!(!store.import_str(payload).await, "import of {payload} should fail");
        assert_eq!(store.drafts().await, before);
    }

    assert_eq!(store.current_draft().await.unwrap().id, id);
}

#[tokio::test]
async fn test_import_rejects_malformed_records() {
    let store = open_store("reports", 10).await;
    store.save(json!(1), DraftKind::Form, None).await;
    let before = store.drafts().await;

    let unknown_type = r#"[{"id": "draft_1_a", "timestamp": 1, "data": {}, "type": "memo"}]"#;
    assert!(!store.import_str(unknown_type).await);

    let missing_id = r#"[{"timestamp": 1, "data": {}, "type": "form"}]"#;
    assert!(!store.import_str(missing_id).await);

    assert_eq!(store.drafts().await, before);
}

#[tokio::test]
async fn test_import_clears_stale_current_draft() {
    let store = open_store("reports", 10).await;
    store.save(json!(1), DraftKind::Form, None).await;

    let imported = r#"[{"id": "draft_5_abc", "timestamp": 5, "data": {"x": 1}, "type": "search"}]"#;
    assert!(store.import_str(imported).await);

    assert!(store.current_draft().await.is_none());
    assert!(!store.update(json!(2)).await);
    assert_eq!(store.load("draft_5_abc").await, Some(json!({"x": 1})));
}

#[tokio::test]
async fn test_import_is_bounded_by_max_drafts() {
    let store = open_store("reports", 2).await;
    let imported = r#"[
        {"id": "draft_3_c", "timestamp": 3, "data": 3, "type": "form"},
        {"id": "draft_2_b", "timestamp": 2, "data": 2, "type": "form"},
        {"id": "draft_1_a", "timestamp": 1, "data": 1, "type": "form"}
    ]"#;

    assert!(store.import_str(imported).await);
    let ids: Vec<String> = store.drafts().await.into_iter().map(|d| d.id).collect();
    assert_eq!(ids, vec!["draft_3_c", "draft_2_b"]);
}

#[tokio::test]
async fn test_export_to_dir_and_import_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store("forms", 10).await;
    store.save(json!({"name": "Ana"}), DraftKind::Form, Some("Contact".to_string())).await;
    let before = store.drafts().await;

    let path = store.export_to_dir(&dir.path().join("exports")).await.unwrap();
    assert!(path.exists());
    assert_eq!(path.file_name().unwrap().to_str().unwrap(), export_file_name("forms"));

    let other = open_store("forms", 10).await;
    assert!(other.import_file(&path).await);
    assert_eq!(other.drafts().await, before);
}

#[tokio::test]
async fn test_import_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store("forms", 10).await;
    store.save(json!(1), DraftKind::Form, None).await;

    assert!(!store.import_file(&dir.path().join("nope.json")).await);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_import_rejects_out_of_range_timestamps() {
    let store = open_store("reports", 10).await;
    let id = store.save(json!("keep me"), DraftKind::Report, None).await;
    let before = store.drafts().await;

    let far_future = format!(r#"[{{"id": "draft_1_a", "timestamp": {}, "data": 1, "type": "form"}}]"#, i64::MAX);
    assert!(!store.import_str(&far_future).await);

    let negative = r#"[{"id": "draft_1_a", "timestamp": -5, "data": 1, "type": "form"}]"#;
    assert!(!store.import_str(negative).await);

    assert_eq!(store.drafts().await, before);
    assert_eq!(store.current_draft().await.unwrap().id, id);
}

#[tokio::test]
async fn test_update_at_latest_timestamp_does_not_overflow() {
    let store = open_store("reports", 10).await;
    let imported = format!(r#"[{{"id": "draft_1_a", "timestamp": {MAX_DRAFT_TIMESTAMP}, "data": 1, "type": "form"}}]"#);
    assert!(store.import_str(&imported).await);

    assert_eq!(store.load("draft_1_a").await, Some(json!(1)));
    assert!(store.update(json!(2)).await);

    let draft = store.draft("draft_1_a").await.unwrap();
    assert_eq!(draft.data, json!(2));
    assert_eq!(draft.timestamp, MAX_DRAFT_TIMESTAMP);
}
