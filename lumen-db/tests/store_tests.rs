//! Integration tests for the Lumen persistence layer, against the embedded
//! in-memory engine.

use std::sync::Arc;

use serde_json::json;

use lumen_core::DynamicKind;
use lumen_db::{Database, Datastore};

async fn create_test_db() -> Database {
    let datastore = Arc::new(Datastore::connect("mem://").await.unwrap());
    let db = Database::new(datastore);
    db.init_schema().await.unwrap();
    db
}

fn manifest_with_dynamic_text() -> serde_json::Value {
    json!({
        "version": 1,
        "default_screen": 1,
        "tabs": [{"id": 1, "label": "Home"}],
        "screens": {
            "1": {
                "type": "FlexLayout",
                "children": [{
                    "type": "DynamicText",
                    "template": "Now: {{time:now}}",
                    "entities": "",
                    "props": {"ttl": 45}
                }]
            }
        }
    })
}

// ============ Board tests ============

#[tokio::test]
async fn test_create_and_list_boards() {
    let db = create_test_db().await;
    assert!(db.is_empty().await.unwrap());

    db.boards.create("living_room").await.unwrap();
    db.boards.create("hallway").await.unwrap();

    let boards = db.boards.list().await.unwrap();
    let names: Vec<_> = boards.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["hallway", "living_room"]);
    assert!(!db.is_empty().await.unwrap());
}

#[tokio::test]
async fn test_duplicate_board_rejected() {
    let db = create_test_db().await;
    db.boards.create("living_room").await.unwrap();
    assert!(db.boards.create("living_room").await.is_err());
}

// ============ Manifest tests ============

#[tokio::test]
async fn test_save_manifest_injects_keys_and_upserts_configs() {
    let db = create_test_db().await;
    db.boards.create("living_room").await.unwrap();

    let configs = db
        .manifests
        .save("living_room", manifest_with_dynamic_text())
        .await
        .unwrap();
    assert_eq!(configs.len(), 1);
    let key = &configs[0].content_key;

    // The persisted manifest carries the injected key.
    let active = db.manifests.get_active("living_room").await.unwrap().unwrap();
    let injected = &active.manifest["screens"]["1"]["children"][0]["content_key"];
    assert_eq!(injected.as_str().unwrap(), key);

    // The flattened config is addressable by key.
    let config = db.dynamic.get_config(key).await.unwrap().unwrap();
    assert_eq!(config.kind, DynamicKind::Plain);
    assert_eq!(config.ttl_seconds, 45);
}

#[tokio::test]
async fn test_resave_keeps_single_active_manifest_and_same_key() {
    let db = create_test_db().await;
    db.boards.create("living_room").await.unwrap();

    let first = db
        .manifests
        .save("living_room", manifest_with_dynamic_text())
        .await
        .unwrap();

    // Save the key-injected manifest again, as an editor round-trip would.
    let active = db.manifests.get_active("living_room").await.unwrap().unwrap();
    let second = db.manifests.save("living_room", active.manifest).await.unwrap();

    assert_eq!(first[0].content_key, second[0].content_key);

    let active = db.manifests.get_active("living_room").await.unwrap().unwrap();
    assert!(active.is_active);
    assert_eq!(active.screen_count(), 1);
}

#[tokio::test]
async fn test_stale_configs_survive_node_removal() {
    let db = create_test_db().await;
    db.boards.create("living_room").await.unwrap();

    let configs = db
        .manifests
        .save("living_room", manifest_with_dynamic_text())
        .await
        .unwrap();
    let key = configs[0].content_key.clone();

    // Replace the manifest with one that has no dynamic nodes.
    let bare = json!({
        "version": 1,
        "default_screen": 1,
        "tabs": [{"id": 1}],
        "screens": {"1": {"type": "FillScreen"}}
    });
    db.manifests.save("living_room", bare).await.unwrap();

    // The old config is intentionally left in place.
    assert!(db.dynamic.get_config(&key).await.unwrap().is_some());
}

// ============ Cache store tests ============

#[tokio::test]
async fn test_cache_set_get_round_trip() {
    let db = create_test_db().await;
    let etag = db.dynamic.set_cached("k1", "hello", 300).await.unwrap();
    assert_eq!(etag, lumen_core::compute_etag("hello"));

    let cached = db.dynamic.get_cached("k1").await.unwrap().unwrap();
    assert_eq!(cached.text, "hello");
    assert_eq!(cached.etag, etag);
    assert!(!cached.expired);

    assert!(db.dynamic.get_cached("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_zero_ttl_reads_as_expired() {
    let db = create_test_db().await;
    db.dynamic.set_cached("k1", "hello", 0).await.unwrap();

    let cached = db.dynamic.get_cached("k1").await.unwrap().unwrap();
    assert!(cached.expired);
}

#[tokio::test]
async fn test_invalidate_all_expires_without_deleting() {
    let db = create_test_db().await;
    db.dynamic.set_cached("k1", "one", 600).await.unwrap();
    db.dynamic.set_cached("k2", "two", 600).await.unwrap();

    db.dynamic.invalidate_all().await.unwrap();

    for key in ["k1", "k2"] {
        let cached = db.dynamic.get_cached(key).await.unwrap().unwrap();
        assert!(cached.expired, "{key} should read as expired");
        assert!(!cached.text.is_empty(), "{key} row should survive");
    }
}

#[tokio::test]
async fn test_cache_overwrite_replaces_text_and_tag() {
    let db = create_test_db().await;
    let first = db.dynamic.set_cached("k1", "old", 600).await.unwrap();
    let second = db.dynamic.set_cached("k1", "new", 600).await.unwrap();
    assert_ne!(first, second);

    let cached = db.dynamic.get_cached("k1").await.unwrap().unwrap();
    assert_eq!(cached.text, "new");
    assert_eq!(cached.etag, second);
}
