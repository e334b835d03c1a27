// Bookmarks services
// Identifier derivation, schema declaration and settings persistence.

pub mod hash_identifier;
pub mod schema_registry;
pub mod settings_engine;
