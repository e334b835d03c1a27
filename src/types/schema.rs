//! Declared shapes for the three bookmark variants.
//!
//! Shapes are JSON-schema style objects. Each variant composes the shared
//! base properties with its own extensions.

use serde_json::{json, Map, Value};

use super::bookmark::VariantTag;

/// Properties every bookmark variant declares.
pub fn base_properties() -> Map<String, Value> {
    let props = json!({
        "id": {
            "type": "string",
            "description": "A string that uniquely identifies this bookmark"
        },
        "url": {
            "type": "string",
            "description": "The url of the bookmarked item",
            "format": "uri"
        },
        "title": {
            "type": "string",
            "description": "Title, headline, or short description"
        },
        "tags": {
            "type": "array",
            "description": "Array of strings; use tags like labels",
            "items": { "type": "string" },
            "default": []
        },
        "createdAt": {
            "type": "string",
            "description": "DateTime string of document creation",
            "format": "date-time"
        },
        "updatedAt": {
            "type": "string",
            "description": "DateTime string of last update",
            "format": "date-time"
        }
    });

    match props {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn variant_properties(tag: VariantTag) -> Value {
    match tag {
        VariantTag::Archive => json!({
            "description": {
                "type": "string",
                "description": "A longer description of the bookmarked item",
                "default": ""
            },
            "thumbnail": {
                "type": "string",
                "description": "A base64-encoded screenshot of the bookmarked page"
            }
        }),
        VariantTag::Browser => json!({}),
        VariantTag::ReadLater => json!({
            "unread": {
                "type": "boolean",
                "description": "Whether the bookmark is unread",
                "default": true
            }
        }),
    }
}

/// Properties that must be present on a stored record of this variant.
pub fn required_properties(tag: VariantTag) -> &'static [&'static str] {
    match tag {
        VariantTag::Archive | VariantTag::Browser => &["id", "url", "title"],
        VariantTag::ReadLater => &["id", "url", "unread"],
    }
}

/// Builds the full declared shape for a variant.
pub fn shape_for(tag: VariantTag) -> Value {
    let mut properties = base_properties();
    if let Value::Object(ext) = variant_properties(tag) {
        properties.extend(ext);
    }

    json!({
        "type": "object",
        "properties": properties,
        "required": required_properties(tag),
    })
}
