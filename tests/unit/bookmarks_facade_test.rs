//! Unit tests for the `Bookmarks` facade: schema declaration on construction,
//! the legacy archive folder, and settings-driven folder overrides.

use std::sync::Arc;

use bookmarks::services::schema_registry::SchemaRegistryTrait;
use bookmarks::store::{LocalStore, ObjectStore};
use bookmarks::types::bookmark::{Bookmark, VariantTag};
use bookmarks::types::settings::BookmarksSettings;
use bookmarks::{Bookmarks, FolderTrait};
use serde_json::json;
use tempfile::TempDir;

async fn setup() -> Bookmarks {
    let store: Arc<dyn ObjectStore> = Arc::new(LocalStore::open_in_memory().unwrap());
    Bookmarks::new(store, BookmarksSettings::default()).await.unwrap()
}

#[tokio::test]
async fn test_archive_folder_is_named_archive() {
    let module = setup().await;
    assert_eq!(module.archive().name(), "archive");
    assert_eq!(module.archive().base_path(), "archive");
    assert_eq!(module.archive().variant_override(), None);
}

#[tokio::test]
async fn test_new_declares_all_types() {
    let module = setup().await;
    // Writes under every tag succeed only if the type was declared.
    for tag in VariantTag::ALL {
        module
            .client()
            .store_object(
                tag.as_str(),
                "probe/x",
                &json!({"id": "x", "url": "http://e.com", "title": "E", "unread": true}),
            )
            .await
            .unwrap();
    }
    assert_eq!(module.schemas().declared().len(), 3);
}

#[tokio::test]
async fn test_open_folder_readlater_forces_variant() {
    let module = setup().await;
    let readlater = module.open_folder("readlater");
    assert_eq!(readlater.variant_override(), Some(VariantTag::ReadLater));

    let stored = readlater
        .store(&mut Bookmark::new("http://e.com", "E"))
        .await
        .unwrap();
    assert_eq!(stored.variant(), VariantTag::ReadLater);

    let fetched = readlater.get(stored.id()).await.unwrap().unwrap();
    assert_eq!(fetched.variant(), VariantTag::ReadLater);
}

#[tokio::test]
async fn test_open_folder_other_names_have_no_override() {
    let module = setup().await;
    assert_eq!(module.open_folder("work").variant_override(), None);
    assert_eq!(module.open_folder("ReadLater").variant_override(), None);
}

#[tokio::test]
async fn test_open_folder_shares_records_between_views() {
    let module = setup().await;
    let stored = module
        .open_folder("work")
        .store(&mut Bookmark::new("http://e.com", "E"))
        .await
        .unwrap();

    // A second, independently opened view sees the same record.
    let again = module.open_folder("work");
    assert_eq!(again.get(stored.id()).await.unwrap(), Some(stored));
}

#[tokio::test]
async fn test_archive_and_open_folder_archive_agree() {
    let module = setup().await;
    let stored = module
        .archive()
        .store(&mut Bookmark::new("http://e.com", "E"))
        .await
        .unwrap();
    let via_open = module.open_folder("archive").search_by_url("http://e.com").await.unwrap();
    assert_eq!(via_open, Some(stored));
}

#[tokio::test]
async fn test_settings_overrides_add_to_readlater_rule() {
    let mut settings = BookmarksSettings::default();
    settings
        .folders
        .variant_overrides
        .insert("imports".to_string(), VariantTag::Browser);
    settings
        .folders
        .variant_overrides
        .insert("readlater".to_string(), VariantTag::Browser);
    settings
        .folders
        .variant_overrides
        .insert("archive".to_string(), VariantTag::Browser);

    let store: Arc<dyn ObjectStore> = Arc::new(LocalStore::open_in_memory().unwrap());
    let module = Bookmarks::new(store, settings).await.unwrap();

    assert_eq!(module.open_folder("imports").variant_override(), Some(VariantTag::Browser));
    assert_eq!(
        module.open_folder("readlater").variant_override(),
        Some(VariantTag::ReadLater)
    );
    // The legacy folder keeps its fixed name whatever the settings say.
    assert_eq!(module.archive().name(), "archive");
    assert_eq!(module.archive().variant_override(), Some(VariantTag::Browser));
}

#[tokio::test]
async fn test_empty_overrides_still_force_readlater() {
    let mut settings = BookmarksSettings::default();
    settings.folders.variant_overrides.clear();

    let store: Arc<dyn ObjectStore> = Arc::new(LocalStore::open_in_memory().unwrap());
    let module = Bookmarks::new(store.clone(), settings).await.unwrap();

    let stored = module
        .open_folder("readlater")
        .store(&mut Bookmark::new("http://e.com", "E"))
        .await
        .unwrap();
    assert_eq!(stored.variant(), VariantTag::ReadLater);

    let raw = store
        .get_object(&format!("readlater/{}", stored.id()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(raw["@context"], json!(VariantTag::ReadLater.context()));
}

#[tokio::test]
async fn test_open_local_uses_configured_path() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("bookmarks.db");
    let mut settings = BookmarksSettings::default();
    settings.storage.database_path = Some(db_path.to_string_lossy().to_string());

    let id = {
        let module = Bookmarks::open_local(settings.clone()).await.unwrap();
        module
            .archive()
            .store(&mut Bookmark::new("http://e.com", "E"))
            .await
            .unwrap()
            .id()
            .to_string()
    };
    assert!(db_path.exists());

    let module = Bookmarks::open_local(settings).await.unwrap();
    assert!(module.archive().get(&id).await.unwrap().is_some());
}
