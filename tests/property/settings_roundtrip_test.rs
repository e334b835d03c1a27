//! Property-based tests for BookmarksSettings serialization round-trip.
//!
//! BookmarksSettings must survive JSON serialization and a save/load cycle
//! through the SettingsEngine without data loss.

use std::collections::HashMap;

use bookmarks::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use bookmarks::types::bookmark::VariantTag;
use bookmarks::types::settings::{BookmarksSettings, FolderSettings, StorageSettings};
use proptest::prelude::*;
use tempfile::TempDir;

fn arb_variant_tag() -> impl Strategy<Value = VariantTag> {
    prop_oneof![
        Just(VariantTag::Archive),
        Just(VariantTag::Browser),
        Just(VariantTag::ReadLater),
    ]
}

fn arb_settings() -> impl Strategy<Value = BookmarksSettings> {
    (
        proptest::option::of("[a-zA-Z0-9/._-]{1,40}"),
        proptest::collection::hash_map("[a-z][a-z0-9 %/]{0,15}", arb_variant_tag(), 0..5),
    )
        .prop_map(|(database_path, variant_overrides)| BookmarksSettings {
            storage: StorageSettings { database_path },
            folders: FolderSettings {
                variant_overrides: variant_overrides.into_iter().collect::<HashMap<_, _>>(),
            },
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn settings_json_roundtrip(settings in arb_settings()) {
        let json = serde_json::to_string(&settings).unwrap();
        let back: BookmarksSettings = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, settings);
    }

    #[test]
    fn settings_save_load_roundtrip(settings in arb_settings()) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json").to_string_lossy().to_string();

        let mut engine = SettingsEngine::new(Some(path.clone()));
        // Write the generated settings through the public key API.
        engine
            .set_value("storage", serde_json::to_value(&settings.storage).unwrap())
            .unwrap();
        engine
            .set_value("folders", serde_json::to_value(&settings.folders).unwrap())
            .unwrap();

        let mut reloaded = SettingsEngine::new(Some(path));
        prop_assert_eq!(reloaded.load().unwrap(), settings);
    }
}
