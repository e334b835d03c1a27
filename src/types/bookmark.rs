use std::fmt;
use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::errors::BookmarkError;

/// Property the store uses to record which type tag an object was written under.
pub const CONTEXT_KEY: &str = "@context";

/// Prefix of every `@context` value written for this module's types.
pub const CONTEXT_PREFIX: &str = "http://remotestorage.io/spec/modules/bookmarks/";

/// The declared schema a bookmark record is stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VariantTag {
    #[default]
    #[serde(rename = "archive-bookmark")]
    Archive,
    #[serde(rename = "browser-bookmark")]
    Browser,
    #[serde(rename = "readlater-bookmark")]
    ReadLater,
}

impl VariantTag {
    pub const ALL: [VariantTag; 3] = [VariantTag::Archive, VariantTag::Browser, VariantTag::ReadLater];

    pub fn as_str(&self) -> &'static str {
        match self {
            VariantTag::Archive => "archive-bookmark",
            VariantTag::Browser => "browser-bookmark",
            VariantTag::ReadLater => "readlater-bookmark",
        }
    }

    /// The `@context` URI for objects stored under this tag.
    pub fn context(&self) -> String {
        format!("{}{}", CONTEXT_PREFIX, self.as_str())
    }

    /// Recovers the tag from an `@context` URI.
    pub fn from_context(context: &str) -> Option<Self> {
        context
            .strip_prefix(CONTEXT_PREFIX)
            .and_then(|tag| tag.parse().ok())
    }
}

impl fmt::Display for VariantTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VariantTag {
    type Err = BookmarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VariantTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| BookmarkError::UnknownVariant(s.to_string()))
    }
}

/// Fields shared by every bookmark variant.
///
/// Properties this crate does not know about are kept in `extra` so that a
/// record written by another application survives a read/modify/store cycle.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkBase {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BookmarkBase {
    pub fn new(url: &str, title: &str) -> Self {
        Self {
            url: url.to_string(),
            title: title.to_string(),
            ..Self::default()
        }
    }
}

/// An archived bookmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveBookmark {
    #[serde(flatten)]
    pub base: BookmarkBase,
    #[serde(default)]
    pub description: String,
    /// Base64-encoded screenshot of the bookmarked page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl ArchiveBookmark {
    pub fn new(url: &str, title: &str) -> Self {
        Self {
            base: BookmarkBase::new(url, title),
            description: String::new(),
            thumbnail: None,
        }
    }

    /// Stores raw screenshot bytes as a base64 thumbnail.
    pub fn set_thumbnail_bytes(&mut self, data: &[u8]) {
        self.thumbnail = Some(BASE64.encode(data));
    }

    /// Decodes the thumbnail, if any.
    pub fn thumbnail_bytes(&self) -> Result<Option<Vec<u8>>, BookmarkError> {
        self.thumbnail
            .as_deref()
            .map(|encoded| {
                BASE64
                    .decode(encoded)
                    .map_err(|e| BookmarkError::InvalidThumbnail(e.to_string()))
            })
            .transpose()
    }
}

/// A bookmark kept outside the archive, e.g. imported from a browser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowserBookmark {
    #[serde(flatten)]
    pub base: BookmarkBase,
}

fn default_unread() -> bool {
    true
}

/// A bookmark the user marked for reading later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadLaterBookmark {
    #[serde(flatten)]
    pub base: BookmarkBase,
    #[serde(default = "default_unread")]
    pub unread: bool,
}

/// A bookmark record of any variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Bookmark {
    Archive(ArchiveBookmark),
    Browser(BrowserBookmark),
    ReadLater(ReadLaterBookmark),
}

impl Bookmark {
    /// Creates an archive bookmark, the default variant.
    pub fn new(url: &str, title: &str) -> Self {
        Bookmark::Archive(ArchiveBookmark::new(url, title))
    }

    /// Creates a bookmark of the given variant with that variant's defaults.
    pub fn with_variant(tag: VariantTag, url: &str, title: &str) -> Self {
        let base = BookmarkBase::new(url, title);
        match tag {
            VariantTag::Archive => Bookmark::Archive(ArchiveBookmark::new(url, title)),
            VariantTag::Browser => Bookmark::Browser(BrowserBookmark { base }),
            VariantTag::ReadLater => Bookmark::ReadLater(ReadLaterBookmark {
                base,
                unread: default_unread(),
            }),
        }
    }

    /// Adds tags, builder style.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.base_mut().tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn variant(&self) -> VariantTag {
        match self {
            Bookmark::Archive(_) => VariantTag::Archive,
            Bookmark::Browser(_) => VariantTag::Browser,
            Bookmark::ReadLater(_) => VariantTag::ReadLater,
        }
    }

    pub fn base(&self) -> &BookmarkBase {
        match self {
            Bookmark::Archive(b) => &b.base,
            Bookmark::Browser(b) => &b.base,
            Bookmark::ReadLater(b) => &b.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut BookmarkBase {
        match self {
            Bookmark::Archive(b) => &mut b.base,
            Bookmark::Browser(b) => &mut b.base,
            Bookmark::ReadLater(b) => &mut b.base,
        }
    }

    pub fn id(&self) -> &str {
        &self.base().id
    }

    pub fn url(&self) -> &str {
        &self.base().url
    }

    pub fn title(&self) -> &str {
        &self.base().title
    }

    pub fn tags(&self) -> &[String] {
        &self.base().tags
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.base().created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.base().updated_at
    }

    /// Serializes the record as the JSON object handed to the store.
    pub fn to_value(&self) -> Result<Value, BookmarkError> {
        serde_json::to_value(self).map_err(|e| BookmarkError::InvalidRecord(e.to_string()))
    }

    /// Reads a stored object, choosing the variant from its `@context`.
    ///
    /// Objects without a recognised `@context` are read as archive bookmarks.
    pub fn from_value(mut value: Value) -> Result<Self, BookmarkError> {
        let obj = value
            .as_object_mut()
            .ok_or_else(|| BookmarkError::InvalidRecord("expected a JSON object".to_string()))?;

        let tag = match obj.remove(CONTEXT_KEY) {
            Some(Value::String(context)) => VariantTag::from_context(&context).unwrap_or_else(|| {
                tracing::warn!(%context, "unrecognised @context, reading as archive bookmark");
                VariantTag::Archive
            }),
            _ => VariantTag::Archive,
        };

        Self::from_value_as(tag, value)
    }

    /// Reads a JSON object as the given variant.
    pub fn from_value_as(tag: VariantTag, value: Value) -> Result<Self, BookmarkError> {
        let parsed = match tag {
            VariantTag::Archive => serde_json::from_value(value).map(Bookmark::Archive),
            VariantTag::Browser => serde_json::from_value(value).map(Bookmark::Browser),
            VariantTag::ReadLater => serde_json::from_value(value).map(Bookmark::ReadLater),
        };
        parsed.map_err(|e| BookmarkError::InvalidRecord(e.to_string()))
    }

    /// Converts the record in place to another variant.
    ///
    /// Shared fields carry over. Fields the target variant does not declare
    /// move into `extra`; fields it does declare are picked up from `extra`.
    pub fn convert(&mut self, tag: VariantTag) -> Result<(), BookmarkError> {
        if self.variant() == tag {
            return Ok(());
        }
        let converted = Self::from_value_as(tag, self.to_value()?)?;
        *self = converted;
        Ok(())
    }
}
