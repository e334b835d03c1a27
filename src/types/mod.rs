// Bookmarks shared type definitions
// Record variants, declared shapes, settings and error enums.

pub mod bookmark;
pub mod errors;
pub mod schema;
pub mod settings;
