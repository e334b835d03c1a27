//! Checks a record against a declared shape.
//!
//! Only the parts of a shape the bookmark types use are enforced: the
//! `required` list and each declared property's JSON `type` (plus `items`
//! for arrays). Format hints are not checked.

use serde_json::Value;

use crate::types::errors::StoreError;

/// Validates `object` against `shape`, naming `tag` in any violation.
pub fn validate(tag: &str, shape: &Value, object: &Value) -> Result<(), StoreError> {
    let violation = |reason: String| StoreError::SchemaViolation {
        tag: tag.to_string(),
        reason,
    };

    let fields = object
        .as_object()
        .ok_or_else(|| violation("record is not an object".to_string()))?;

    if let Some(required) = shape.get("required").and_then(Value::as_array) {
        for key in required.iter().filter_map(Value::as_str) {
            match fields.get(key) {
                None | Some(Value::Null) => {
                    return Err(violation(format!("missing required property '{}'", key)))
                }
                Some(_) => {}
            }
        }
    }

    if let Some(properties) = shape.get("properties").and_then(Value::as_object) {
        for (key, declared) in properties {
            let Some(value) = fields.get(key) else {
                continue;
            };
            let Some(expected) = declared.get("type").and_then(Value::as_str) else {
                continue;
            };
            if !matches_type(expected, value) {
                return Err(violation(format!(
                    "property '{}' should be of type {}",
                    key, expected
                )));
            }
            if let (Some(items), Value::Array(elements)) = (declared.get("items"), value) {
                if let Some(item_type) = items.get("type").and_then(Value::as_str) {
                    if elements.iter().any(|e| !matches_type(item_type, e)) {
                        return Err(violation(format!(
                            "property '{}' should only contain items of type {}",
                            key, item_type
                        )));
                    }
                }
            }
        }
    }

    Ok(())
}

fn matches_type(expected: &str, value: &Value) -> bool {
    match expected {
        "string" => value.is_string(),
        "boolean" => value.is_boolean(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "null" => value.is_null(),
        _ => true,
    }
}
