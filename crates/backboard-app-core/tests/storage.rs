// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Preferences adapter behavior against the in-memory store fake.

use backboard_app_core::{PreferencesStorage, StateStorage, StoreError};
use backboard_dry_tests::InMemoryStore;
use serde_json::json;
use std::sync::Arc;

fn storage() -> (InMemoryStore, PreferencesStorage<InMemoryStore>) {
    let store = InMemoryStore::new();
    (store.clone(), PreferencesStorage::new(store))
}

#[tokio::test]
async fn never_written_key_reads_absent() {
    let (_, storage) = storage();
    assert_eq!(storage.read("nope").await.unwrap(), None);
}

#[tokio::test]
async fn write_then_read_returns_value() {
    let (store, storage) = storage();
    storage.write("theme", "dark").await.unwrap();
    assert_eq!(storage.read("theme").await.unwrap().as_deref(), Some("dark"));
    assert_eq!(store.value("theme"), Some(json!("dark")));
}

#[tokio::test]
async fn empty_string_reads_absent_but_is_stored() {
    let (_, storage) = storage();
    storage.write("theme", "").await.unwrap();
    assert_eq!(storage.read("theme").await.unwrap(), None);
    // the raw value is still there
    assert_eq!(storage.read_value("theme").await.unwrap(), Some(json!("")));
}

#[tokio::test]
async fn falsy_values_seeded_in_store_read_absent() {
    let (store, storage) = storage();
    store.insert("zero", json!(0));
    store.insert("no", json!(false));
    store.insert("null", json!(null));
    store.insert("yes", json!(true));

    assert_eq!(storage.read("zero").await.unwrap(), None);
    assert_eq!(storage.read("no").await.unwrap(), None);
    assert_eq!(storage.read("null").await.unwrap(), None);
    assert_eq!(storage.read("yes").await.unwrap().as_deref(), Some("true"));
}

#[tokio::test]
async fn last_write_wins() {
    let (_, storage) = storage();
    storage.write("k", "v1").await.unwrap();
    storage.write("k", "v2").await.unwrap();
    assert_eq!(storage.read("k").await.unwrap().as_deref(), Some("v2"));
}

#[tokio::test]
async fn delete_removes_and_tolerates_absent_keys() {
    let (store, storage) = storage();
    storage.write("k", "v").await.unwrap();
    storage.delete("k").await.unwrap();
    assert_eq!(storage.read("k").await.unwrap(), None);
    assert!(!store.contains_key("k"));

    storage.delete("k").await.unwrap();
    storage.delete("never").await.unwrap();
    assert_eq!(store.delete_count(), 3);
}

#[tokio::test]
async fn theme_scenario() {
    let (_, storage) = storage();
    storage.write("theme", "dark").await.unwrap();
    assert_eq!(storage.read("theme").await.unwrap().as_deref(), Some("dark"));
    storage.write("theme", "").await.unwrap();
    assert_eq!(storage.read("theme").await.unwrap(), None);
    storage.delete("theme").await.unwrap();
    storage.delete("theme").await.unwrap();
}

#[tokio::test]
async fn store_failures_propagate() {
    let (store, storage) = storage();
    store.set_fail_on_get(true);
    store.set_fail_on_write(true);

    assert!(matches!(
        storage.read("k").await,
        Err(StoreError::Other(_))
    ));
    assert!(storage.write("k", "v").await.is_err());
    assert!(storage.delete("k").await.is_err());
}

#[tokio::test]
async fn each_operation_is_a_single_pass_through() {
    let (store, storage) = storage();
    storage.write("a", "1").await.unwrap();
    storage.read("a").await.unwrap();
    storage.delete("a").await.unwrap();
    assert_eq!(
        (store.set_count(), store.get_count(), store.delete_count()),
        (1, 1, 1)
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn shared_adapter_serves_concurrent_tasks() {
    let storage = Arc::new(PreferencesStorage::new(InMemoryStore::new()));
    let mut handles = Vec::new();
    for i in 0..16 {
        let storage = Arc::clone(&storage);
        handles.push(tokio::spawn(async move {
            let key = format!("key-{i}");
            storage.write(&key, &format!("value-{i}")).await?;
            storage.read(&key).await
        }));
    }
    for (i, handle) in handles.into_iter().enumerate() {
        let read = handle.await.unwrap().unwrap();
        assert_eq!(read, Some(format!("value-{i}")));
    }
}

#[tokio::test]
async fn adapter_hands_back_its_store() {
    let (seen, storage) = storage();
    storage.write("k", "v").await.unwrap();
    assert_eq!(storage.store().get_count(), 0);

    let store = storage.into_inner();
    assert_eq!(store.value("k"), Some(json!("v")));
    store.reset();
    assert!(seen.keys().is_empty());
}
