// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared preference services for Backboard (storage port, adapter, persisted state).
//! Keeps the backing store and UI/runtime adapters thin and framework-agnostic.

pub mod persist;
pub mod prefs;
pub mod storage;
pub mod store;

pub use persist::{PersistService, PersistedState};
pub use prefs::{AppPreferences, ColorScheme};
pub use storage::{absent_if_falsy, PreferencesStorage, StateStorage};
pub use store::{KeyValueStore, StoreError};
