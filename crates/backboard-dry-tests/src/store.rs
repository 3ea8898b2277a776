// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory key-value store fake for testing without filesystem I/O.

use backboard_app_core::store::{KeyValueStore, StoreError};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// In-memory implementation of [`KeyValueStore`] for testing.
///
/// Clones share state, so a test can hand one clone to the code under test
/// and inspect the other. Call counts are tracked per operation.
///
/// # Example
///
/// ```
/// use backboard_dry_tests::InMemoryStore;
/// use backboard_app_core::{PreferencesStorage, StateStorage};
///
/// # tokio_test_block_on(async {
/// let store = InMemoryStore::new();
/// let storage = PreferencesStorage::new(store.clone());
///
/// storage.write("theme", "dark").await.unwrap();
/// assert_eq!(store.set_count(), 1);
/// assert_eq!(store.value("theme"), Some(serde_json::json!("dark")));
/// # });
/// # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
/// # }
/// ```
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Mutex<InMemoryStoreInner>>,
}

#[derive(Default)]
struct InMemoryStoreInner {
    data: HashMap<String, Value>,
    get_count: usize,
    set_count: usize,
    delete_count: usize,
    fail_on_get: bool,
    fail_on_write: bool,
}

impl InMemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given entries.
    ///
    /// Useful for seeding non-string values the string adapter cannot write.
    pub fn with_data(data: HashMap<String, Value>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(InMemoryStoreInner {
                data,
                ..Default::default()
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, InMemoryStoreInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Configure the store to fail on `get`.
    pub fn set_fail_on_get(&self, fail: bool) {
        self.lock().fail_on_get = fail;
    }

    /// Configure the store to fail on `set` and `delete`.
    pub fn set_fail_on_write(&self, fail: bool) {
        self.lock().fail_on_write = fail;
    }

    /// Number of `get` calls attempted (including failed ones).
    pub fn get_count(&self) -> usize {
        self.lock().get_count
    }

    /// Number of `set` calls attempted (including failed ones).
    pub fn set_count(&self) -> usize {
        self.lock().set_count
    }

    /// Number of `delete` calls attempted (including failed ones).
    pub fn delete_count(&self) -> usize {
        self.lock().delete_count
    }

    /// Raw value currently stored under `key`, bypassing counters and failure flags.
    pub fn value(&self, key: &str) -> Option<Value> {
        self.lock().data.get(key).cloned()
    }

    /// Insert a raw value directly, bypassing counters and failure flags.
    pub fn insert(&self, key: impl Into<String>, value: Value) {
        self.lock().data.insert(key.into(), value);
    }

    /// Return all keys currently present in the store.
    pub fn keys(&self) -> Vec<String> {
        self.lock().data.keys().cloned().collect()
    }

    /// Check if a key exists in the store.
    pub fn contains_key(&self, key: &str) -> bool {
        self.lock().data.contains_key(key)
    }

    /// Reset data, counters and failure flags.
    pub fn reset(&self) {
        *self.lock() = InMemoryStoreInner::default();
    }
}

impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let mut inner = self.lock();
        inner.get_count += 1;

        if inner.fail_on_get {
            return Err(StoreError::Other("simulated get failure".into()));
        }

        Ok(inner.data.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.set_count += 1;

        if inner.fail_on_write {
            return Err(StoreError::Other("simulated set failure".into()));
        }

        inner.data.insert(key.to_owned(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        let mut inner = self.lock();
        inner.delete_count += 1;

        if inner.fail_on_write {
            return Err(StoreError::Other("simulated delete failure".into()));
        }

        Ok(inner.data.remove(key).is_some())
    }
}
