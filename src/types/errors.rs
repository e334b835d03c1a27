use std::fmt;

// === StoreError ===

/// Errors reported by an object store backend.
#[derive(Debug)]
pub enum StoreError {
    /// The store could not be reached or the request failed in transit.
    Unavailable(String),
    /// The record did not match the shape declared for its type tag.
    SchemaViolation { tag: String, reason: String },
    /// No shape has been declared under the given type tag.
    UnknownType(String),
    /// Failed to serialize or deserialize a stored object.
    Serialization(String),
    /// Database operation failed.
    DatabaseError(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable(msg) => write!(f, "Store unavailable: {}", msg),
            StoreError::SchemaViolation { tag, reason } => {
                write!(f, "Schema violation for {}: {}", tag, reason)
            }
            StoreError::UnknownType(tag) => write!(f, "Unknown object type: {}", tag),
            StoreError::Serialization(msg) => write!(f, "Store serialization error: {}", msg),
            StoreError::DatabaseError(msg) => write!(f, "Store database error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::DatabaseError(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

// === BookmarkError ===

/// Errors related to folder and bookmark operations.
#[derive(Debug)]
pub enum BookmarkError {
    /// The underlying store call failed. Passed through unchanged.
    Store(StoreError),
    /// The bookmark has no URL to derive an id from.
    MissingUrl,
    /// The given string is not a known variant tag.
    UnknownVariant(String),
    /// The store returned an object that is not a bookmark record.
    InvalidRecord(String),
    /// The thumbnail is not valid base64.
    InvalidThumbnail(String),
}

impl fmt::Display for BookmarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookmarkError::Store(e) => write!(f, "{}", e),
            BookmarkError::MissingUrl => write!(f, "Bookmark has no url"),
            BookmarkError::UnknownVariant(tag) => {
                write!(f, "Unknown bookmark variant: {}", tag)
            }
            BookmarkError::InvalidRecord(msg) => write!(f, "Invalid bookmark record: {}", msg),
            BookmarkError::InvalidThumbnail(msg) => {
                write!(f, "Invalid bookmark thumbnail: {}", msg)
            }
        }
    }
}

impl std::error::Error for BookmarkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BookmarkError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for BookmarkError {
    fn from(e: StoreError) -> Self {
        BookmarkError::Store(e)
    }
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}
