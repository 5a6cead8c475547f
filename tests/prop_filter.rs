use bson::oid::ObjectId;
use bson::{Bson, doc};
use bsonfilter::{parse_filter_str, parse_request_str};
use proptest::prelude::*;

proptest! {
    #![proptest_config(proptest::test_runner::Config {
        failure_persistence: Some(Box::new(proptest::test_runner::FileFailurePersistence::WithSource("proptest-regressions"))),
        .. proptest::test_runner::Config::default()
    })]
    // Any 12 bytes rendered as hex under `_id` come back as the same identifier
    #[test]
    fn prop_hex_id_coerced(bytes in any::<[u8; 12]>(), upper in any::<bool>()) {
        let mut hex_id = hex::encode(bytes);
        if upper { hex_id = hex_id.to_ascii_uppercase(); }
        let d = parse_filter_str(&format!(r#"{{"_id":"{hex_id}"}}"#)).unwrap();
        prop_assert_eq!(d.get("_id"), Some(&Bson::ObjectId(ObjectId::from_bytes(bytes))));
    }

    // Same, one level down inside an array element
    #[test]
    fn prop_nested_hex_id_coerced(bytes in any::<[u8; 12]>()) {
        let hex_id = hex::encode(bytes);
        let d = parse_filter_str(&format!(r#"{{"items":[{{"_id":"{hex_id}"}}]}}"#)).unwrap();
        let first = d.get_array("items").unwrap()[0].as_document().unwrap().clone();
        prop_assert_eq!(first, doc! { "_id": ObjectId::from_bytes(bytes) });
    }

    // Strings that are not exactly 24 hex digits are returned untouched
    #[test]
    fn prop_non_id_strings_untouched(s in "[a-zA-Z0-9 ]{0,40}") {
        prop_assume!(!(s.len() == 24 && s.chars().all(|c| c.is_ascii_hexdigit())));
        let body = serde_json::json!({ "_id": s.clone() }).to_string();
        let d = parse_filter_str(&body).unwrap();
        prop_assert_eq!(d.get_str("_id").unwrap(), s.as_str());
    }

    // Strict extended JSON keeps the written key order
    #[test]
    fn prop_extended_order_preserved(names in proptest::collection::vec("[a-z]{1,8}", 1..12)) {
        let mut unique: Vec<String> = Vec::new();
        for n in names {
            if !unique.contains(&n) { unique.push(n); }
        }
        let fields: Vec<String> = unique
            .iter()
            .enumerate()
            .map(|(i, n)| format!(r#""{n}":{{"$numberLong":"{i}"}}"#))
            .collect();
        let d = parse_filter_str(&format!("{{{}}}", fields.join(","))).unwrap();
        let keys: Vec<String> = d.keys().cloned().collect();
        prop_assert_eq!(keys, unique);
    }

    // Sort keys keep their written order
    #[test]
    fn prop_sort_order_preserved(dirs in proptest::collection::vec(prop_oneof![Just(1i64), Just(-1i64)], 1..8)) {
        let fields: Vec<String> = dirs.iter().enumerate().map(|(i, d)| format!(r#""f{i}":{d}"#)).collect();
        let req = parse_request_str(&format!(r#"{{"sort":{{{}}}}}"#, fields.join(","))).unwrap();
        let sort = req.sort.unwrap();
        prop_assert_eq!(sort.len(), dirs.len());
        for (i, (k, v)) in sort.iter().enumerate() {
            prop_assert_eq!(k.clone(), format!("f{i}"));
            prop_assert_eq!(v, &Bson::Int32(i32::try_from(dirs[i]).unwrap()));
        }
    }

    // Arbitrary bytes never panic
    #[test]
    fn prop_parse_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
        let _ = bsonfilter::parse_filter(&bytes);
        let _ = bsonfilter::parse_request(&bytes);
    }
}
