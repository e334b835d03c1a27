//! Bookmarks module entry point.
//!
//! [`Bookmarks`] declares the record types to a store and hands out
//! [`Folder`] views over it.

use std::sync::Arc;

use crate::managers::folder::Folder;
use crate::platform;
use crate::services::schema_registry::{SchemaRegistry, SchemaRegistryTrait};
use crate::store::{LocalStore, ObjectStore};
use crate::types::errors::StoreError;
use crate::types::settings::{BookmarksSettings, LEGACY_FOLDER};

/// File name of the local store inside the platform data directory.
pub const DEFAULT_DATABASE_FILE: &str = "bookmarks.db";

/// Top-level handle: the store, its declared types, and folder access.
pub struct Bookmarks {
    client: Arc<dyn ObjectStore>,
    settings: BookmarksSettings,
    schemas: SchemaRegistry,
    archive: Folder,
}

impl Bookmarks {
    /// Declares the bookmark types to `client` and opens the legacy folder.
    pub async fn new(
        client: Arc<dyn ObjectStore>,
        settings: BookmarksSettings,
    ) -> Result<Self, StoreError> {
        let schemas = SchemaRegistry::new();
        schemas.declare_all(client.as_ref()).await?;

        let archive = Self::folder_for(&client, &settings, LEGACY_FOLDER);

        Ok(Self {
            client,
            settings,
            schemas,
            archive,
        })
    }

    /// Opens a [`LocalStore`] at the configured path and builds the module on it.
    ///
    /// Without a configured path the store lives in the platform data directory.
    pub async fn open_local(settings: BookmarksSettings) -> Result<Self, StoreError> {
        let path = match &settings.storage.database_path {
            Some(p) => std::path::PathBuf::from(p),
            None => {
                let dir = platform::get_data_dir();
                std::fs::create_dir_all(&dir).map_err(|e| {
                    StoreError::Unavailable(format!("Failed to create data directory: {}", e))
                })?;
                dir.join(DEFAULT_DATABASE_FILE)
            }
        };
        let store: Arc<dyn ObjectStore> = Arc::new(LocalStore::open(path)?);
        Self::new(store, settings).await
    }

    fn folder_for(client: &Arc<dyn ObjectStore>, settings: &BookmarksSettings, name: &str) -> Folder {
        let folder = Folder::new(Arc::clone(client), name);
        match settings.folders.override_for(name) {
            Some(tag) => folder.with_variant_override(tag),
            None => folder,
        }
    }

    /// Returns a fresh view over the folder called `name`.
    pub fn open_folder(&self, name: &str) -> Folder {
        Self::folder_for(&self.client, &self.settings, name)
    }

    /// The legacy `archive` folder. New code should use [`Bookmarks::open_folder`].
    pub fn archive(&self) -> &Folder {
        &self.archive
    }

    /// The underlying store, for callers that need direct access.
    pub fn client(&self) -> &Arc<dyn ObjectStore> {
        &self.client
    }

    /// The shapes declared for each bookmark variant.
    pub fn schemas(&self) -> &SchemaRegistry {
        &self.schemas
    }

    pub fn settings(&self) -> &BookmarksSettings {
        &self.settings
    }
}
