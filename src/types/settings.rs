use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::bookmark::VariantTag;

/// Name of the legacy folder the facade opens on construction. Not configurable.
pub const LEGACY_FOLDER: &str = "archive";

/// Name of the folder whose records are always stored as read-later bookmarks.
pub const READLATER_FOLDER: &str = "readlater";

/// Top-level settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BookmarksSettings {
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub folders: FolderSettings,
}

/// Where the bundled local store keeps its data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct StorageSettings {
    /// Path of the SQLite file. `None` means the platform data directory.
    pub database_path: Option<String>,
}

/// Per-folder variant overrides.
///
/// These add to the built-in `readlater` rule and cannot replace it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct FolderSettings {
    pub variant_overrides: HashMap<String, VariantTag>,
}

impl FolderSettings {
    /// The variant forced on every record stored in `folder`, if any.
    pub fn override_for(&self, folder: &str) -> Option<VariantTag> {
        if folder == READLATER_FOLDER {
            return Some(VariantTag::ReadLater);
        }
        self.variant_overrides.get(folder).copied()
    }
}
