// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! String-only storage contract for state-management code, and the adapter
//! that serves it from a [`KeyValueStore`].

use crate::store::{KeyValueStore, StoreError};
use serde_json::Value;
use std::future::Future;

/// Async storage contract: serialized string values keyed by name.
///
/// `read` yields `Ok(None)` for absence; errors are reserved for store failures.
pub trait StateStorage: Send + Sync {
    /// Read the value stored under `name`, or `None` if absent.
    fn read(&self, name: &str) -> impl Future<Output = Result<Option<String>, StoreError>> + Send;

    /// Store `value` under `name`, replacing any prior value.
    fn write(&self, name: &str, value: &str) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Remove `name`. Deleting an absent name succeeds.
    fn delete(&self, name: &str) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Map a backing-store lookup onto the absent sentinel (`None`).
///
/// Falsy results collapse to `None`: a missing entry, `null`, `false`, any
/// number equal to zero, and the empty string. A stored `""` therefore reads
/// back as absent, the same as a key that was never written. Truthy strings
/// are returned unchanged; other truthy values (including empty arrays and
/// objects) are returned as compact JSON text.
///
/// Use [`PreferencesStorage::read_value`] when `""` must stay distinguishable
/// from absence.
pub fn absent_if_falsy(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64().is_some_and(|f| f == 0.0) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// Adapter presenting a [`KeyValueStore`] as a [`StateStorage`].
///
/// Every call is a direct pass-through: no buffering, batching or retries.
/// Concurrent writes to one name race and the last completed write wins.
#[derive(Debug, Clone, Default)]
pub struct PreferencesStorage<S> {
    store: S,
}

impl<S> PreferencesStorage<S> {
    /// Wrap `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the adapter and return the backing store.
    pub fn into_inner(self) -> S {
        self.store
    }
}

impl<S> PreferencesStorage<S>
where
    S: KeyValueStore,
{
    /// Raw stored value for `name`, without mapping falsy values to absence.
    pub async fn read_value(&self, name: &str) -> Result<Option<Value>, StoreError> {
        self.store.get(name).await
    }
}

impl<S> StateStorage for PreferencesStorage<S>
where
    S: KeyValueStore,
{
    async fn read(&self, name: &str) -> Result<Option<String>, StoreError> {
        let value = self.store.get(name).await?;
        Ok(absent_if_falsy(value))
    }

    async fn write(&self, name: &str, value: &str) -> Result<(), StoreError> {
        self.store.set(name, Value::String(value.to_owned())).await
    }

    async fn delete(&self, name: &str) -> Result<(), StoreError> {
        self.store.delete(name).await?;
        Ok(())
    }
}
