//! URL-derived bookmark identifiers.
//!
//! A bookmark's id is the lowercase hex SHA-256 of its URL bytes. No
//! normalisation happens first: `http://e.com` and `http://e.com/` are
//! different bookmarks.

use ring::digest;

use crate::types::errors::BookmarkError;

/// Derives the identifier for a URL.
pub fn id_for(url: &str) -> String {
    let hash = digest::digest(&digest::SHA256, url.as_bytes());
    hex_encode(hash.as_ref())
}

/// Rejects URLs that cannot identify a bookmark.
pub fn validate_url(url: &str) -> Result<(), BookmarkError> {
    if url.trim().is_empty() {
        return Err(BookmarkError::MissingUrl);
    }
    Ok(())
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
