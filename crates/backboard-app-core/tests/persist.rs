// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Persisted-state envelopes and application preferences over the adapter.

use backboard_app_core::prefs::{PREFERENCES_KEY, PREFERENCES_VERSION};
use backboard_app_core::{
    AppPreferences, ColorScheme, PersistService, PreferencesStorage, StateStorage, StoreError,
};
use backboard_dry_tests::InMemoryStore;
use serde_json::json;

fn service() -> (InMemoryStore, PersistService<PreferencesStorage<InMemoryStore>>) {
    let store = InMemoryStore::new();
    let service = PersistService::new(PreferencesStorage::new(store.clone()));
    (store, service)
}

#[tokio::test]
async fn missing_state_loads_none() {
    let (_, service) = service();
    let loaded: Option<AppPreferences> = service.load(PREFERENCES_KEY, 0).await.unwrap();
    assert_eq!(loaded, None);
}

#[tokio::test]
async fn save_writes_envelope_string() {
    let (store, service) = service();
    let prefs = AppPreferences {
        color_scheme: ColorScheme::Dark,
        blueboard_url: Some("https://blueboard.example".into()),
    };
    service.save(PREFERENCES_KEY, &prefs, 3).await.unwrap();

    let raw = store.value(PREFERENCES_KEY).unwrap();
    let raw = raw.as_str().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(raw).unwrap();
    assert_eq!(
        parsed,
        json!({
            "state": {"color_scheme": "dark", "blueboard_url": "https://blueboard.example"},
            "version": 3
        })
    );

    let loaded: AppPreferences = service.load(PREFERENCES_KEY, 3).await.unwrap().unwrap();
    assert_eq!(loaded, prefs);
}

#[tokio::test]
async fn version_mismatch_is_discarded() {
    let (_, service) = service();
    service
        .save(PREFERENCES_KEY, &AppPreferences::default(), 1)
        .await
        .unwrap();
    let loaded: Option<AppPreferences> = service.load(PREFERENCES_KEY, 2).await.unwrap();
    assert_eq!(loaded, None);
}

#[tokio::test]
async fn envelope_without_version_defaults_to_zero() {
    let (store, service) = service();
    store.insert(PREFERENCES_KEY, json!(r#"{"state":{"color_scheme":"dark"}}"#));
    let loaded: AppPreferences = service
        .load(PREFERENCES_KEY, PREFERENCES_VERSION)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(loaded.color_scheme, ColorScheme::Dark);
}

#[tokio::test]
async fn malformed_state_is_a_serde_error() {
    let (store, service) = service();
    store.insert(PREFERENCES_KEY, json!("not json"));
    let result = service
        .load::<AppPreferences>(PREFERENCES_KEY, PREFERENCES_VERSION)
        .await;
    assert!(matches!(result, Err(StoreError::Serde(_))));
}

#[tokio::test]
async fn clear_removes_state() {
    let (store, service) = service();
    service
        .save(PREFERENCES_KEY, &AppPreferences::default(), 0)
        .await
        .unwrap();
    service.clear(PREFERENCES_KEY).await.unwrap();
    assert!(!store.contains_key(PREFERENCES_KEY));
    service.clear(PREFERENCES_KEY).await.unwrap();
}

#[tokio::test]
async fn toggling_color_scheme_persists() {
    let (_, service) = service();
    for expected in [ColorScheme::Dark, ColorScheme::Light, ColorScheme::Dark] {
        let mut prefs: AppPreferences = service
            .load(PREFERENCES_KEY, PREFERENCES_VERSION)
            .await
            .unwrap()
            .unwrap_or_default();
        prefs.color_scheme = prefs.color_scheme.toggle();
        service
            .save(PREFERENCES_KEY, &prefs, PREFERENCES_VERSION)
            .await
            .unwrap();

        let reloaded: AppPreferences = service
            .load(PREFERENCES_KEY, PREFERENCES_VERSION)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reloaded.color_scheme, expected);
    }
}

#[tokio::test]
async fn service_exposes_and_returns_its_storage() {
    let (store, service) = service();
    service
        .save(PREFERENCES_KEY, &AppPreferences::default(), PREFERENCES_VERSION)
        .await
        .unwrap();

    let raw = service.storage().read(PREFERENCES_KEY).await.unwrap().unwrap();
    assert!(raw.contains(r#""version":0"#));

    let storage = service.into_inner();
    storage.delete(PREFERENCES_KEY).await.unwrap();
    assert!(!store.contains_key(PREFERENCES_KEY));
}
