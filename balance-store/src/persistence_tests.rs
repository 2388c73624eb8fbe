//! Settings persistence round-trip and edge case tests.

use std::path::PathBuf;
use tempfile::TempDir;

use crate::persistence::{load_json, load_json_or_default, save_json};
use crate::settings_store::{LogLevel, Settings, SettingsStore};
use crate::test_support::monzo;
use balance_core::ApiEnvironment;

// ============================================================================
// JSON Persistence Tests
// ============================================================================

#[tokio::test]
async fn test_save_creates_parent_directories() {
    let temp_dir = TempDir::new().unwrap();
    let nested_path = temp_dir.path().join("deeply").join("nested").join("test.json");

    save_json(&nested_path, &serde_json::json!({"key": "value"}))
        .await
        .unwrap();

    assert!(nested_path.exists());
    assert!(!nested_path.with_extension("json.tmp").exists());
}

#[tokio::test]
async fn test_load_nonexistent_file() {
    let file_path = PathBuf::from("/nonexistent/path/settings.json");

    let result: Result<Settings, _> = load_json(&file_path).await;
    assert!(result.is_err());

    let settings: Settings = load_json_or_default(&file_path).await;
    assert!(settings.credentials.is_empty());
}

#[tokio::test]
async fn test_corrupt_file_falls_back_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("settings.json");
    tokio::fs::write(&file_path, "{ not json").await.unwrap();

    let settings: Settings = load_json_or_default(&file_path).await;
    assert_eq!(settings.environment, ApiEnvironment::Live);
}

// ============================================================================
// Settings Persistence Tests
// ============================================================================

#[tokio::test]
async fn test_settings_full_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("settings.json");

    let settings = Settings {
        environment: ApiEnvironment::Sandbox,
        log_level: LogLevel::Debug,
        truelayer_client_id: Some("client-id".to_string()),
        credentials: vec![monzo("A"), monzo("B")],
    };

    save_json(&file_path, &settings).await.unwrap();
    let loaded: Settings = load_json(&file_path).await.unwrap();

    assert_eq!(loaded.environment, ApiEnvironment::Sandbox);
    assert_eq!(loaded.log_level, LogLevel::Debug);
    assert_eq!(loaded.truelayer_client_id.as_deref(), Some("client-id"));
    assert_eq!(loaded.credentials, vec![monzo("A"), monzo("B")]);
}

#[tokio::test]
async fn test_settings_file_holds_no_secrets() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("settings.json");

    let store = SettingsStore::new(file_path.clone());
    store
        .update(|s| {
            s.truelayer_client_id = Some("client-id".to_string());
            s.credentials = vec![monzo("C")];
        })
        .await;
    store.save().await.unwrap();

    let raw = tokio::fs::read_to_string(&file_path).await.unwrap();
    assert!(raw.contains("client-id"));
    assert!(!raw.contains("access_token"));
    assert!(!raw.contains("secret"));
}

#[tokio::test]
async fn test_settings_store_save_and_reload() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("settings.json");

    let store = SettingsStore::new(file_path.clone());
    store.set_environment(ApiEnvironment::Sandbox).await;
    store.save().await.unwrap();

    let reloaded = SettingsStore::load(file_path).await;
    assert_eq!(reloaded.environment().await, ApiEnvironment::Sandbox);
    assert_eq!(reloaded.log_level().await, LogLevel::Warn);
}
