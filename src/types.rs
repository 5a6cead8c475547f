use bson::{Bson, Document};

/// Canonical query/filter representation: an insertion-ordered BSON document.
pub type OrderedDocument = Document;

/// Dynamically-typed value tree used by the plain-JSON fallback.
pub type GenericValue = Bson;

/// Key whose hex-string values are coerced into object identifiers.
pub const ID_KEY: &str = "_id";

/// Length of the canonical hex encoding of a 12-byte object identifier.
pub const OBJECT_ID_HEX_LEN: usize = 24;

/// Smallest BSON integer that can hold `v`.
#[inline]
#[must_use]
pub fn int_to_bson(v: i64) -> Bson {
    i32::try_from(v).map_or(Bson::Int64(v), Bson::Int32)
}
