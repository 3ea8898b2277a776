// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Versioned state persistence on top of a [`StateStorage`].

use crate::storage::StateStorage;
use crate::store::StoreError;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::warn;

/// JSON envelope written for each persisted state blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState<T> {
    /// The persisted state.
    pub state: T,
    /// Schema version the state was written with.
    #[serde(default)]
    pub version: u32,
}

/// Thin service that serializes state envelopes and delegates storage to a `StateStorage`.
pub struct PersistService<S> {
    storage: S,
}

impl<S> PersistService<S> {
    /// Create a new service using the given storage.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Borrow the underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Consume the service and return the inner storage.
    pub fn into_inner(self) -> S {
        self.storage
    }
}

impl<S> PersistService<S>
where
    S: StateStorage,
{
    /// Load the state stored under `name`.
    ///
    /// Returns `Ok(None)` when nothing is stored, or when the stored envelope
    /// was written with a different `version` (no migration is attempted;
    /// the caller falls back to its initial state).
    pub async fn load<T>(&self, name: &str, version: u32) -> Result<Option<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        let Some(raw) = self.storage.read(name).await? else {
            return Ok(None);
        };
        let envelope: PersistedState<T> = serde_json::from_str(&raw)?;
        if envelope.version != version {
            warn!(
                name,
                stored = envelope.version,
                expected = version,
                "discarding persisted state with mismatched version"
            );
            return Ok(None);
        }
        Ok(Some(envelope.state))
    }

    /// Serialize and persist `state` under `name` with `version`.
    pub async fn save<T>(&self, name: &str, state: &T, version: u32) -> Result<(), StoreError>
    where
        T: Serialize,
    {
        let raw = serde_json::to_string(&PersistedState { state, version })?;
        self.storage.write(name, &raw).await
    }

    /// Remove the state stored under `name`.
    pub async fn clear(&self, name: &str) -> Result<(), StoreError> {
        self.storage.delete(name).await
    }
}
