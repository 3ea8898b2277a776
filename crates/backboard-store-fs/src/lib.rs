// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Filesystem-backed `KeyValueStore` for Backboard (uses platform config dir).

use backboard_app_core::storage::PreferencesStorage;
use backboard_app_core::store::{KeyValueStore, StoreError};
use directories::ProjectDirs;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, MutexGuard, OnceCell};
use tracing::{debug, info};

/// Fixed identifier of the preferences store file.
pub const PREFERENCES_STORE: &str = ".preferences.dat";

static PREFERENCES: OnceLock<LazyStore> = OnceLock::new();

/// Process-wide preferences store (`.preferences.dat` in the user config directory).
///
/// Created on first call and kept for the lifetime of the process. Nothing is
/// read from disk until the first operation on the returned store.
pub fn preferences_store() -> &'static LazyStore {
    PREFERENCES.get_or_init(|| LazyStore::in_config_dir(PREFERENCES_STORE))
}

/// The preferences adapter over [`preferences_store`].
pub fn preferences_storage() -> PreferencesStorage<&'static LazyStore> {
    PreferencesStorage::new(preferences_store())
}

enum Location {
    ConfigDir(String),
    Path(PathBuf),
}

struct Loaded {
    path: PathBuf,
    entries: Map<String, Value>,
    on_disk: bool,
}

impl Loaded {
    async fn persist(&mut self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let data = serde_json::to_vec_pretty(&self.entries)?;
        // a torn write must never replace the last good file
        let tmp = temp_path(&self.path)?;
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(&data).await?;
        file.sync_all().await?;
        drop(file);
        tokio::fs::rename(&tmp, &self.path).await?;
        if !self.on_disk {
            info!(path = %self.path.display(), "created store file");
            self.on_disk = true;
        }
        debug!(path = %self.path.display(), entries = self.entries.len(), "saved store");
        Ok(())
    }
}

/// Sibling file the store is written to before being renamed over `path`.
fn temp_path(path: &Path) -> Result<PathBuf, StoreError> {
    let name = path.file_name().ok_or_else(|| {
        StoreError::Unavailable(format!("store path {} has no file name", path.display()))
    })?;
    let mut tmp = name.to_os_string();
    tmp.push(".tmp");
    Ok(path.with_file_name(tmp))
}

/// Read the JSON object at `path`. Missing or blank files are an empty store.
async fn read_entries(path: &Path) -> Result<(Map<String, Value>, bool), StoreError> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) if content.trim().is_empty() => Ok((Map::new(), true)),
        Ok(content) => Ok((serde_json::from_str(&content)?, true)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok((Map::new(), false)),
        Err(err) => Err(StoreError::Io(err)),
    }
}

/// JSON key-value store kept in a single file, loaded on first use.
///
/// Construction does no I/O. The first operation resolves the file location
/// and reads it; a failed first load is not cached and the next call retries.
/// Every mutation writes the whole map to a sibling `.tmp` file and renames it
/// over the store file before returning, so the file on disk is always a
/// complete map. Operations on one instance are serialized in submission order.
pub struct LazyStore {
    location: Location,
    state: OnceCell<Mutex<Loaded>>,
}

impl LazyStore {
    /// Store named `name` under the user config directory (e.g., `~/.config/Backboard`).
    pub fn in_config_dir(name: impl Into<String>) -> Self {
        Self::with_location(Location::ConfigDir(name.into()))
    }

    /// Store backed by the file at `path`.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self::with_location(Location::Path(path.into()))
    }

    fn with_location(location: Location) -> Self {
        Self {
            location,
            state: OnceCell::new(),
        }
    }

    /// Resolve the backing file path without touching the filesystem.
    pub fn path(&self) -> Result<PathBuf, StoreError> {
        match &self.location {
            Location::Path(path) => Ok(path.clone()),
            Location::ConfigDir(name) => {
                let proj = ProjectDirs::from("hu", "lovassyapp", "Backboard").ok_or_else(|| {
                    StoreError::Unavailable("could not resolve config dir".into())
                })?;
                Ok(proj.config_dir().join(name))
            }
        }
    }

    /// Whether the file has been loaded yet.
    pub fn is_loaded(&self) -> bool {
        self.state.initialized()
    }

    async fn loaded(&self) -> Result<MutexGuard<'_, Loaded>, StoreError> {
        let state = self
            .state
            .get_or_try_init(|| async {
                let path = self.path()?;
                let (entries, on_disk) = read_entries(&path).await?;
                debug!(path = %path.display(), entries = entries.len(), "loaded store");
                Ok::<_, StoreError>(Mutex::new(Loaded {
                    path,
                    entries,
                    on_disk,
                }))
            })
            .await?;
        Ok(state.lock().await)
    }

    /// Value stored under `key`, if any.
    pub async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.loaded().await?.entries.get(key).cloned())
    }

    /// Store `value` under `key` and write the file.
    ///
    /// If the write fails the in-memory entry is rolled back.
    pub async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut loaded = self.loaded().await?;
        let previous = loaded.entries.insert(key.to_owned(), value);
        if let Err(err) = loaded.persist().await {
            match previous {
                Some(previous) => loaded.entries.insert(key.to_owned(), previous),
                None => loaded.entries.remove(key),
            };
            return Err(err);
        }
        Ok(())
    }

    /// Remove `key`, writing the file only if an entry existed. Returns whether it existed.
    pub async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        let mut loaded = self.loaded().await?;
        let Some(previous) = loaded.entries.remove(key) else {
            return Ok(false);
        };
        if let Err(err) = loaded.persist().await {
            loaded.entries.insert(key.to_owned(), previous);
            return Err(err);
        }
        Ok(true)
    }

    /// Whether `key` has an entry (of any value).
    pub async fn has(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.loaded().await?.entries.contains_key(key))
    }

    /// All keys, in sorted order.
    pub async fn keys(&self) -> Result<Vec<String>, StoreError> {
        let mut keys: Vec<String> = self.loaded().await?.entries.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    /// Number of entries.
    pub async fn len(&self) -> Result<usize, StoreError> {
        Ok(self.loaded().await?.entries.len())
    }

    /// Whether the store has no entries.
    pub async fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.loaded().await?.entries.is_empty())
    }

    /// Remove every entry and write the file.
    pub async fn clear(&self) -> Result<(), StoreError> {
        let mut loaded = self.loaded().await?;
        let previous = std::mem::take(&mut loaded.entries);
        if let Err(err) = loaded.persist().await {
            loaded.entries = previous;
            return Err(err);
        }
        Ok(())
    }

    /// Discard in-memory entries and re-read the file.
    pub async fn reload(&self) -> Result<(), StoreError> {
        let mut loaded = self.loaded().await?;
        let (entries, on_disk) = read_entries(&loaded.path).await?;
        debug!(path = %loaded.path.display(), entries = entries.len(), "reloaded store");
        loaded.entries = entries;
        loaded.on_disk = on_disk;
        Ok(())
    }

    /// Write the current entries to the file.
    pub async fn save(&self) -> Result<(), StoreError> {
        self.loaded().await?.persist().await
    }
}

impl KeyValueStore for LazyStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        LazyStore::get(self, key).await
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        LazyStore::set(self, key, value).await
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        LazyStore::delete(self, key).await
    }
}
