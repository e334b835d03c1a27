//! Object store layer.
//!
//! [`ObjectStore`] is the seam to the per-user, path-addressed document
//! store. Paths are `/`-separated; a path ending in `/` names a folder.
//! [`LocalStore`] is a bundled SQLite implementation.
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use bookmarks::store::{LocalStore, ObjectStore, ObjectStoreExt};
//!
//! # async fn demo() -> Result<(), bookmarks::types::errors::StoreError> {
//! let store: Arc<dyn ObjectStore> = Arc::new(LocalStore::open_in_memory()?);
//! let archive = store.scope("archive/");
//! let listing = archive.get_all("", None).await?;
//! # Ok(())
//! # }
//! ```

pub mod local;
pub mod migrations;
pub mod scoped;
pub mod validation;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::types::errors::StoreError;

pub use local::LocalStore;
pub use scoped::ScopedStore;

/// Operations the bookmarks layer consumes from the object store.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Registers a shape under a type tag. Re-declaring the same tag succeeds.
    async fn declare_type(&self, tag: &str, shape: &Value) -> Result<(), StoreError>;

    /// Point read. `Ok(None)` when nothing is stored at `path`.
    async fn get_object(&self, path: &str) -> Result<Option<Value>, StoreError>;

    /// Lists the objects directly under `prefix`, keyed by item name.
    ///
    /// `max_age` is a staleness hint; its meaning belongs to the store.
    /// `Ok(None)` when the store has no listing for the prefix.
    async fn get_all(
        &self,
        prefix: &str,
        max_age: Option<Duration>,
    ) -> Result<Option<BTreeMap<String, Value>>, StoreError>;

    /// Typed point write. Replaces whatever was stored at `path`.
    async fn store_object(&self, tag: &str, path: &str, object: &Value) -> Result<(), StoreError>;

    /// Point delete. Removing a missing path is not an error.
    async fn remove(&self, path: &str) -> Result<(), StoreError>;
}

/// Scoping for shared store handles.
pub trait ObjectStoreExt {
    /// Returns a handle whose paths are relative to `prefix`.
    fn scope(&self, prefix: &str) -> ScopedStore;
}

impl ObjectStoreExt for Arc<dyn ObjectStore> {
    fn scope(&self, prefix: &str) -> ScopedStore {
        ScopedStore::new(Arc::clone(self), prefix)
    }
}
