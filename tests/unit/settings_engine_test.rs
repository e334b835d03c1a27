//! Integration-level unit tests for the SettingsEngine public API.
//!
//! These tests exercise the SettingsEngine through its public trait interface,
//! validating default loading, value persistence, and reset behavior.

use bookmarks::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use bookmarks::types::bookmark::VariantTag;
use bookmarks::types::errors::SettingsError;
use bookmarks::types::settings::{BookmarksSettings, READLATER_FOLDER};
use serde_json::json;
use tempfile::TempDir;

/// Helper: create a SettingsEngine backed by a temp directory that lives for the
/// duration of the test (the caller holds the `TempDir` handle).
fn engine_in_temp(dir: &TempDir) -> SettingsEngine {
    let path = dir
        .path()
        .join("settings.json")
        .to_string_lossy()
        .to_string();
    SettingsEngine::new(Some(path))
}

#[test]
fn test_defaults() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    let settings = engine.load().unwrap();

    assert_eq!(settings, BookmarksSettings::default());
    assert!(settings.folders.variant_overrides.is_empty());
    assert_eq!(
        settings.folders.override_for(READLATER_FOLDER),
        Some(VariantTag::ReadLater)
    );
    assert_eq!(settings.storage.database_path, None);
}

/// A change made through `set_value` is visible to a fresh engine reading
/// the same file.
#[test]
fn test_set_value_persists_changes() {
    let dir = TempDir::new().unwrap();

    {
        let mut engine = engine_in_temp(&dir);
        engine.load().unwrap();
        engine
            .set_value("storage.database_path", json!("/var/lib/bookmarks.db"))
            .unwrap();
        engine
            .set_value("folders.variant_overrides.imports", json!("browser-bookmark"))
            .unwrap();
    }

    let mut engine = engine_in_temp(&dir);
    let loaded = engine.load().unwrap();
    assert_eq!(
        loaded.storage.database_path.as_deref(),
        Some("/var/lib/bookmarks.db")
    );
    assert_eq!(loaded.folders.override_for("imports"), Some(VariantTag::Browser));
}

#[test]
fn test_set_value_wrong_type_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();

    let result = engine.set_value("storage.database_path", json!(12));
    assert!(matches!(result, Err(SettingsError::InvalidValue(_))));
    // The in-memory settings are unchanged.
    assert_eq!(engine.get_settings().storage.database_path, None);
}

#[test]
fn test_set_value_unknown_section() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    let result = engine.set_value("network.timeout", json!(5));
    assert!(matches!(result, Err(SettingsError::InvalidKey(_))));
}

#[test]
fn test_reset_restores_defaults() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();
    engine
        .set_value("folders.variant_overrides.imports", json!("browser-bookmark"))
        .unwrap();
    assert_eq!(
        engine.get_settings().folders.override_for("imports"),
        Some(VariantTag::Browser)
    );

    engine.reset().unwrap();
    assert_eq!(engine.get_settings(), &BookmarksSettings::default());

    let mut reloaded = engine_in_temp(&dir);
    assert_eq!(reloaded.load().unwrap(), BookmarksSettings::default());
}

#[test]
fn test_malformed_file_is_a_serialization_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("settings.json"), "{ not json").unwrap();

    let mut engine = engine_in_temp(&dir);
    assert!(matches!(
        engine.load(),
        Err(SettingsError::SerializationError(_))
    ));
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("settings.json"),
        r#"{"storage": {"database_path": "x.db"}}"#,
    )
    .unwrap();

    let mut engine = engine_in_temp(&dir);
    let settings = engine.load().unwrap();
    assert_eq!(settings.storage.database_path.as_deref(), Some("x.db"));
    assert_eq!(settings.folders, Default::default());
}

#[test]
fn test_default_config_path_uses_platform() {
    let engine = SettingsEngine::new(None);
    let path = engine.get_config_path();
    assert!(path.ends_with("settings.json"));
    assert!(path.to_lowercase().contains("bookmarks"));
}

#[test]
fn test_readlater_override_cannot_be_replaced() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();
    engine
        .set_value("folders.variant_overrides.readlater", json!("browser-bookmark"))
        .unwrap();

    assert_eq!(
        engine.get_settings().folders.override_for(READLATER_FOLDER),
        Some(VariantTag::ReadLater)
    );
}
