//! Bookmark folders.
//!
//! A [`Folder`] is a stateless view over every record stored under one path
//! prefix. It derives ids from URLs, stamps creation and update times, and
//! delegates all reads and writes to the object store. Nothing is cached:
//! every call is a store round-trip.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, warn};

use crate::services::hash_identifier::{id_for, validate_url};
use crate::store::{ObjectStore, ObjectStoreExt, ScopedStore};
use crate::types::bookmark::{Bookmark, VariantTag};
use crate::types::errors::BookmarkError;
use crate::types::settings::READLATER_FOLDER;

/// Trait defining folder-scoped bookmark operations.
#[async_trait]
pub trait FolderTrait {
    /// Reads the record stored under `id`. Absence is `Ok(None)`.
    ///
    /// The object comes back as a typed [`Bookmark`], not verbatim: one that
    /// does not parse as any bookmark variant is `BookmarkError::InvalidRecord`.
    async fn get(&self, id: &str) -> Result<Option<Bookmark>, BookmarkError>;
    /// Lists every record in the folder, in no particular order.
    async fn get_all(&self, max_age: Option<Duration>) -> Result<Vec<Bookmark>, BookmarkError>;
    /// Reads the record whose id derives from `url`.
    async fn search_by_url(&self, url: &str) -> Result<Option<Bookmark>, BookmarkError>;
    /// Lists records sharing at least one tag with `tags`.
    async fn search_by_tags(&self, tags: &[String]) -> Result<Vec<Bookmark>, BookmarkError>;
    /// Writes `bookmark`, updating its id and timestamps in place.
    async fn store(&self, bookmark: &mut Bookmark) -> Result<Bookmark, BookmarkError>;
    /// Deletes the record stored under `id`. Missing ids are not an error.
    async fn remove(&self, id: &str) -> Result<(), BookmarkError>;
}

/// A named collection of bookmarks stored under `<base_path>/`.
#[derive(Clone)]
pub struct Folder {
    store: Arc<dyn ObjectStore>,
    client: ScopedStore,
    name: String,
    base_path: String,
    variant_override: Option<VariantTag>,
}

impl Folder {
    /// Creates a view over the folder called `name`.
    ///
    /// The base path is `name` percent-encoded, so names containing `/`
    /// stay a single folder. The folder named `readlater` always stores
    /// read-later bookmarks.
    pub fn new(store: Arc<dyn ObjectStore>, name: &str) -> Self {
        let base_path = urlencoding::encode(name).into_owned();
        let client = store.scope(&format!("{}/", base_path));
        let variant_override = (name == READLATER_FOLDER).then_some(VariantTag::ReadLater);
        Self {
            store,
            client,
            name: name.to_string(),
            base_path,
            variant_override,
        }
    }

    /// Forces every record stored through this folder to `tag`,
    /// whatever variant the caller passes in.
    ///
    /// Has no effect on the `readlater` folder, which keeps its built-in
    /// read-later override.
    pub fn with_variant_override(mut self, tag: VariantTag) -> Self {
        if self.name == READLATER_FOLDER {
            if tag != VariantTag::ReadLater {
                warn!(folder = %self.name, %tag, "ignoring variant override");
            }
            return self;
        }
        self.variant_override = Some(tag);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn variant_override(&self) -> Option<VariantTag> {
        self.variant_override
    }

    /// Store handle scoped to this folder's base path.
    pub fn client(&self) -> &ScopedStore {
        &self.client
    }

    /// The id a bookmark for `url` gets in any folder.
    pub fn id_for_url(&self, url: &str) -> String {
        id_for(url)
    }

    fn path_for(&self, id: &str) -> String {
        format!("{}/{}", self.base_path, id)
    }
}

impl std::fmt::Debug for Folder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Folder")
            .field("name", &self.name)
            .field("base_path", &self.base_path)
            .field("variant_override", &self.variant_override)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl FolderTrait for Folder {
    async fn get(&self, id: &str) -> Result<Option<Bookmark>, BookmarkError> {
        let path = self.path_for(id);
        debug!(folder = %self.name, %path, "get");
        match self.store.get_object(&path).await? {
            Some(value) => Bookmark::from_value(value).map(Some),
            None => Ok(None),
        }
    }

    /// Objects in the folder that are not bookmark records are skipped.
    async fn get_all(&self, max_age: Option<Duration>) -> Result<Vec<Bookmark>, BookmarkError> {
        let prefix = format!("{}/", self.base_path);
        debug!(folder = %self.name, ?max_age, "get_all");

        let Some(listing) = self.store.get_all(&prefix, max_age).await? else {
            return Ok(Vec::new());
        };

        let bookmarks = listing
            .into_iter()
            .filter_map(|(item, value)| match Bookmark::from_value(value) {
                Ok(bookmark) => Some(bookmark),
                Err(e) => {
                    warn!(folder = %self.name, %item, error = %e, "skipping non-bookmark object");
                    None
                }
            })
            .collect();
        Ok(bookmarks)
    }

    async fn search_by_url(&self, url: &str) -> Result<Option<Bookmark>, BookmarkError> {
        self.get(&id_for(url)).await
    }

    async fn search_by_tags(&self, tags: &[String]) -> Result<Vec<Bookmark>, BookmarkError> {
        let bookmarks = self.get_all(None).await?;
        Ok(bookmarks
            .into_iter()
            .filter(|b| b.tags().iter().any(|t| tags.contains(t)))
            .collect())
    }

    /// A record that already has `created_at` is treated as an update and
    /// gets a fresh `updated_at`; otherwise `created_at` is set. No prior
    /// read decides this. The write replaces any record with the same id.
    async fn store(&self, bookmark: &mut Bookmark) -> Result<Bookmark, BookmarkError> {
        validate_url(bookmark.url())?;

        if let Some(tag) = self.variant_override {
            bookmark.convert(tag)?;
        }

        let base = bookmark.base_mut();
        base.id = id_for(&base.url);
        let now = Utc::now();
        if base.created_at.is_some() {
            base.updated_at = Some(now);
        } else {
            base.created_at = Some(now);
        }

        let path = self.path_for(bookmark.id());
        let tag = bookmark.variant();
        debug!(folder = %self.name, %path, %tag, "store");
        self.store
            .store_object(tag.as_str(), &path, &bookmark.to_value()?)
            .await?;

        Ok(bookmark.clone())
    }

    async fn remove(&self, id: &str) -> Result<(), BookmarkError> {
        let path = self.path_for(id);
        debug!(folder = %self.name, %path, "remove");
        self.store.remove(&path).await?;
        Ok(())
    }
}
