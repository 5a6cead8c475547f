use bson::{Bson, Document};
use serde_json::{Map, Number, Value};

use super::coerce::coerce_document;
use super::extjson::decode_extended;
use crate::errors::{FilterDecodeError, FilterError};
use crate::types::int_to_bson;

/// Parses a filter payload into an ordered BSON document.
///
/// Extended JSON is tried first and keeps field order exactly as written. Otherwise the
/// payload is read as a plain JSON object and every `_id` hex string becomes an object id.
/// The fallback only promises the key order produced by the plain-JSON decoder.
///
/// An empty payload is an empty filter.
///
/// # Errors
/// Returns [`FilterError::Decode`] carrying both decode failures when the payload is
/// neither extended JSON nor a plain JSON object.
pub fn parse_filter(body: &[u8]) -> Result<Document, FilterError> {
    if body.is_empty() {
        return Ok(Document::new());
    }
    let extended = match decode_extended(body) {
        Ok(doc) => return Ok(doc),
        Err(e) => e,
    };

    // `null` decodes to no map at all and reads as an empty filter.
    let plain: Option<Map<String, Value>> =
        serde_json::from_slice(body).map_err(|plain| FilterDecodeError { extended, plain })?;
    let mut doc = plain.map(lift_object).unwrap_or_default();
    coerce_document(&mut doc);
    Ok(doc)
}

/// # Errors
/// See [`parse_filter`].
pub fn parse_filter_str(json: &str) -> Result<Document, FilterError> {
    parse_filter(json.as_bytes())
}

/// Literal conversion of a plain JSON value into BSON.
///
/// No extended-JSON interpretation happens here: `{"$oid": "..."}` stays a one-field
/// document.
#[must_use]
pub fn lift(value: Value) -> Bson {
    match value {
        Value::Null => Bson::Null,
        Value::Bool(b) => Bson::Boolean(b),
        Value::Number(n) => lift_number(&n),
        Value::String(s) => Bson::String(s),
        Value::Array(items) => Bson::Array(items.into_iter().map(lift).collect()),
        Value::Object(map) => Bson::Document(lift_object(map)),
    }
}

#[must_use]
pub fn lift_object(map: Map<String, Value>) -> Document {
    map.into_iter().map(|(k, v)| (k, lift(v))).collect()
}

fn lift_number(n: &Number) -> Bson {
    if let Some(i) = n.as_i64() {
        return int_to_bson(i);
    }
    // Every JSON number has an f64 reading without `arbitrary_precision`.
    Bson::Double(n.as_f64().unwrap_or(f64::NAN))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn lift_maps_scalars() {
        assert_eq!(lift(serde_json::json!(null)), Bson::Null);
        assert_eq!(lift(serde_json::json!(true)), Bson::Boolean(true));
        assert_eq!(lift(serde_json::json!(21)), Bson::Int32(21));
        assert_eq!(lift(serde_json::json!(5_000_000_000_i64)), Bson::Int64(5_000_000_000));
        assert_eq!(lift(serde_json::json!(1.5)), Bson::Double(1.5));
        assert_eq!(lift(serde_json::json!(u64::MAX)), Bson::Double(u64::MAX as f64));
        assert_eq!(lift(serde_json::from_str("1e300").unwrap()), Bson::Double(1e300));
        assert_eq!(lift(serde_json::from_str("-0.0").unwrap()), Bson::Double(-0.0));
        assert_eq!(lift(serde_json::json!("s")), Bson::String("s".into()));
    }

    #[test]
    fn lift_keeps_wrapper_keys_literal() {
        let v = serde_json::json!({ "_id": { "$oid": "bogus" } });
        assert_eq!(lift(v), Bson::Document(doc! { "_id": { "$oid": "bogus" } }));
    }

    #[test]
    fn null_payload_is_empty_filter() {
        assert!(parse_filter(b"null").unwrap().is_empty());
    }

    #[test]
    fn malformed_wrapper_falls_back_to_literal_document() {
        let d = parse_filter(br#"{"ts":{"$date":"not a date"},"n":1}"#).unwrap();
        assert_eq!(d.get_document("ts").unwrap().get_str("$date").unwrap(), "not a date");
        assert_eq!(d.get_i32("n").unwrap(), 1);
    }
}
