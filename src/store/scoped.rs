use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::ObjectStore;
use crate::types::errors::StoreError;

/// A store handle limited to one path prefix.
///
/// Every path passed in is relative to the prefix. Scoping a scoped handle
/// appends to the prefix.
#[derive(Clone)]
pub struct ScopedStore {
    inner: Arc<dyn ObjectStore>,
    prefix: String,
}

impl ScopedStore {
    pub fn new(inner: Arc<dyn ObjectStore>, prefix: &str) -> Self {
        Self {
            inner,
            prefix: prefix.to_string(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Narrows the scope further.
    pub fn scope(&self, sub: &str) -> ScopedStore {
        ScopedStore::new(Arc::clone(&self.inner), &self.full_path(sub))
    }

    fn full_path(&self, relative: &str) -> String {
        format!("{}{}", self.prefix, relative)
    }
}

impl std::fmt::Debug for ScopedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedStore")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ObjectStore for ScopedStore {
    async fn declare_type(&self, tag: &str, shape: &Value) -> Result<(), StoreError> {
        self.inner.declare_type(tag, shape).await
    }

    async fn get_object(&self, path: &str) -> Result<Option<Value>, StoreError> {
        self.inner.get_object(&self.full_path(path)).await
    }

    async fn get_all(
        &self,
        prefix: &str,
        max_age: Option<Duration>,
    ) -> Result<Option<BTreeMap<String, Value>>, StoreError> {
        self.inner.get_all(&self.full_path(prefix), max_age).await
    }

    async fn store_object(&self, tag: &str, path: &str, object: &Value) -> Result<(), StoreError> {
        self.inner.store_object(tag, &self.full_path(path), object).await
    }

    async fn remove(&self, path: &str) -> Result<(), StoreError> {
        self.inner.remove(&self.full_path(path)).await
    }
}
