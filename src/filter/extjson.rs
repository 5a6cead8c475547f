//! Strict extended-JSON decoding.
//!
//! A payload counts as extended JSON only when it is a JSON object that carries at least one
//! type wrapper (`{"$oid": ...}`, `{"$date": ...}`, ...) and every wrapper is well formed.
//! Anything else is left to the plain-JSON fallback in [`super::parse`].

use bson::Document;
use serde_json::{Map, Value};

use crate::errors::ExtendedJsonError;

/// Reserved wrapper keys of Extended JSON v2.
///
/// Legacy `$regex` is not listed since it is also a query operator.
pub const TYPE_WRAPPER_KEYS: &[&str] = &[
    "$oid",
    "$date",
    "$numberInt",
    "$numberLong",
    "$numberDouble",
    "$numberDecimal",
    "$binary",
    "$uuid",
    "$regularExpression",
    "$timestamp",
    "$minKey",
    "$maxKey",
    "$undefined",
    "$symbol",
    "$code",
    "$dbPointer",
];

/// Decodes `body` as strict extended JSON into an ordered document.
///
/// Field order follows the payload exactly.
///
/// # Errors
/// Returns an [`ExtendedJsonError`] when the payload is not JSON, is not an object, carries
/// no type wrapper, or contains a wrapper the BSON codec rejects.
pub fn decode_extended(body: &[u8]) -> Result<Document, ExtendedJsonError> {
    let value: Value = serde_json::from_slice(body)?;
    let map = match value {
        Value::Object(map) => map,
        other => return Err(ExtendedJsonError::NotAnObject(json_kind(&other))),
    };
    if !object_has_type_wrapper(&map) {
        return Err(ExtendedJsonError::NoTypeWrapper);
    }
    Document::try_from(map).map_err(|e| ExtendedJsonError::Malformed(e.to_string()))
}

/// True if any object in `value`, at any depth, uses a reserved wrapper key.
#[must_use]
pub fn has_type_wrapper(value: &Value) -> bool {
    match value {
        Value::Object(map) => object_has_type_wrapper(map),
        Value::Array(items) => items.iter().any(has_type_wrapper),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => false,
    }
}

fn object_has_type_wrapper(map: &Map<String, Value>) -> bool {
    map.iter().any(|(k, v)| TYPE_WRAPPER_KEYS.contains(&k.as_str()) || has_type_wrapper(v))
}

pub(crate) const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
