//! Schema Registry for the bookmark variants.
//!
//! Declares the archive, browser and read-later shapes to an object store
//! before any record is written under those tags. The shapes are metadata
//! for the store; folders do not validate records themselves.

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use crate::store::ObjectStore;
use crate::types::bookmark::VariantTag;
use crate::types::errors::StoreError;
use crate::types::schema;

/// Trait defining schema registration operations.
#[async_trait]
pub trait SchemaRegistryTrait {
    /// Declares every variant's shape to `store`.
    async fn declare_all(&self, store: &dyn ObjectStore) -> Result<(), StoreError>;
    /// The shape declared for `tag`.
    fn shape(&self, tag: VariantTag) -> &Value;
    /// All declared shapes, in tag order.
    fn declared(&self) -> Vec<(VariantTag, &Value)>;
}

/// Holds the built shapes for all three variants.
pub struct SchemaRegistry {
    archive: Value,
    browser: Value,
    readlater: Value,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self {
            archive: schema::shape_for(VariantTag::Archive),
            browser: schema::shape_for(VariantTag::Browser),
            readlater: schema::shape_for(VariantTag::ReadLater),
        }
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SchemaRegistryTrait for SchemaRegistry {
    async fn declare_all(&self, store: &dyn ObjectStore) -> Result<(), StoreError> {
        for (tag, shape) in self.declared() {
            store.declare_type(tag.as_str(), shape).await?;
        }
        info!("declared bookmark types");
        Ok(())
    }

    fn shape(&self, tag: VariantTag) -> &Value {
        match tag {
            VariantTag::Archive => &self.archive,
            VariantTag::Browser => &self.browser,
            VariantTag::ReadLater => &self.readlater,
        }
    }

    fn declared(&self) -> Vec<(VariantTag, &Value)> {
        VariantTag::ALL
            .into_iter()
            .map(|tag| (tag, self.shape(tag)))
            .collect()
    }
}
