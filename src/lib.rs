//! Folder-scoped bookmark records on a path-addressed object store.
//!
//! This library crate exposes all modules for use by host applications and
//! integration tests.

pub mod app;
pub mod managers;
pub mod platform;
pub mod services;
pub mod store;
pub mod types;

pub use app::Bookmarks;
pub use managers::folder::{Folder, FolderTrait};
pub use types::bookmark::{Bookmark, VariantTag};
