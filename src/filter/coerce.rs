//! `_id` coercion over a decoded value tree.
//!
//! Plain JSON cannot express an object identifier, so by convention a 24-digit hex string
//! stored under `_id` stands for one. This walker rewrites those strings in place, at any
//! depth. It is the only coercion applied on the fallback path.

use bson::oid::ObjectId;
use bson::{Bson, Document};

use crate::types::{ID_KEY, OBJECT_ID_HEX_LEN};

/// Rewrites every `_id` hex string in `tree` into a [`Bson::ObjectId`].
pub fn coerce(tree: &mut Bson) {
    match tree {
        Bson::Document(doc) => coerce_document(doc),
        Bson::Array(items) => items.iter_mut().for_each(coerce),
        _ => {}
    }
}

pub fn coerce_document(doc: &mut Document) {
    for (key, value) in doc.iter_mut() {
        if key.as_str() == ID_KEY
            && let Bson::String(s) = &mut *value
        {
            let s = std::mem::take(s);
            *value = coerce_object_id(s);
            continue;
        }
        coerce(value);
    }
}

/// Best-effort conversion of a hex string into an object identifier.
///
/// Returns the original string unchanged when it is not exactly 24 hex digits.
#[must_use]
pub fn coerce_object_id(s: String) -> Bson {
    if s.len() != OBJECT_ID_HEX_LEN {
        return Bson::String(s);
    }
    match ObjectId::parse_str(&s) {
        Ok(oid) => Bson::ObjectId(oid),
        Err(_) => Bson::String(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    const HEX: &str = "507f1f77bcf86cd799439011";

    fn oid() -> Bson {
        Bson::ObjectId(ObjectId::parse_str(HEX).unwrap())
    }

    #[test]
    fn coerces_top_level_id() {
        let mut d = doc! { "_id": HEX, "name": "x" };
        coerce_document(&mut d);
        assert_eq!(d.get("_id"), Some(&oid()));
        assert_eq!(d.get_str("name").unwrap(), "x");
    }

    #[test]
    fn coerces_nested_and_array_ids() {
        let mut tree = Bson::Document(doc! {
            "$or": [ { "_id": HEX }, { "owner": { "_id": HEX } } ],
            "ref": { "_id": { "$in": [HEX] } },
        });
        coerce(&mut tree);
        let Bson::Document(d) = tree else { panic!("root must stay a document") };
        let or = d.get_array("$or").unwrap();
        assert_eq!(or[0].as_document().unwrap().get("_id"), Some(&oid()));
        let owner = or[1].as_document().unwrap().get_document("owner").unwrap();
        assert_eq!(owner.get("_id"), Some(&oid()));
        // `$in` is not `_id`, so array members under it stay strings
        let in_vals = d.get_document("ref").unwrap().get_document("_id").unwrap();
        assert_eq!(in_vals.get_array("$in").unwrap()[0], Bson::String(HEX.into()));
    }

    #[test]
    fn leaves_other_keys_alone() {
        let mut d = doc! { "id": HEX, "user_id": HEX };
        coerce_document(&mut d);
        assert_eq!(d.get_str("id").unwrap(), HEX);
        assert_eq!(d.get_str("user_id").unwrap(), HEX);
    }

    #[test]
    fn invalid_ids_are_kept() {
        assert_eq!(coerce_object_id("abc".into()), Bson::String("abc".into()));
        let not_hex = "zz7f1f77bcf86cd799439011";
        assert_eq!(coerce_object_id(not_hex.into()), Bson::String(not_hex.into()));
        let too_long = format!("{HEX}00");
        assert_eq!(coerce_object_id(too_long.clone()), Bson::String(too_long));
    }

    #[test]
    fn non_string_ids_are_walked() {
        let mut d = doc! { "_id": { "_id": HEX }, "n": 1 };
        coerce_document(&mut d);
        assert_eq!(d.get_document("_id").unwrap().get("_id"), Some(&oid()));
        assert_eq!(d.get_i32("n").unwrap(), 1);
    }
}
