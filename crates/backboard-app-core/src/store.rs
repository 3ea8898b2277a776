// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Async key-value store port consumed by the preferences adapter.

use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;

/// Storage port for JSON values keyed by logical name.
///
/// Implementations own the persisted layout. Callers only see
/// value-or-absent reads and acknowledged writes.
pub trait KeyValueStore: Send + Sync {
    /// Look up `key`. Returns `Ok(None)` when nothing is stored.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<Value>, StoreError>> + Send;

    /// Associate `value` with `key`, replacing any prior value.
    fn set(&self, key: &str, value: Value) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Remove `key`. Returns whether an entry existed; removing a missing key is not an error.
    fn delete(&self, key: &str) -> impl Future<Output = Result<bool, StoreError>> + Send;
}

impl<T: KeyValueStore> KeyValueStore for &T {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<Value>, StoreError>> + Send {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: Value) -> impl Future<Output = Result<(), StoreError>> + Send {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> impl Future<Output = Result<bool, StoreError>> + Send {
        (**self).delete(key)
    }
}

impl<T: KeyValueStore> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<Value>, StoreError>> + Send {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: Value) -> impl Future<Output = Result<(), StoreError>> + Send {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> impl Future<Output = Result<bool, StoreError>> + Send {
        (**self).delete(key)
    }
}

/// Error type for store operations.
///
/// Absence is never an error; see [`KeyValueStore::get`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error while reading/writing the backing file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization/deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// The store could not be located or initialized.
    #[error("store unavailable: {0}")]
    Unavailable(String),
    /// Catch-all error variant.
    #[error("other: {0}")]
    Other(String),
}
