//! Extended-JSON rendering of parsed documents for display.

use bson::{Bson, Document};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Native JSON numbers and dates where lossless
    #[default]
    Relaxed,
    /// Every value type-wrapped
    Canonical,
}

#[must_use]
pub fn to_extjson(doc: Document, format: OutputFormat) -> serde_json::Value {
    let value = Bson::Document(doc);
    match format {
        OutputFormat::Relaxed => value.into_relaxed_extjson(),
        OutputFormat::Canonical => value.into_canonical_extjson(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use bson::oid::ObjectId;
    use serde_json::json;

    #[test]
    fn relaxed_and_canonical_output() {
        let oid = ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap();
        let d = doc! { "_id": oid, "n": 1 };
        assert_eq!(
            to_extjson(d.clone(), OutputFormat::Relaxed),
            json!({ "_id": { "$oid": "507f1f77bcf86cd799439011" }, "n": 1 })
        );
        assert_eq!(
            to_extjson(d, OutputFormat::Canonical),
            json!({ "_id": { "$oid": "507f1f77bcf86cd799439011" }, "n": { "$numberInt": "1" } })
        );
    }

    #[test]
    fn format_names_parse_case_insensitively() {
        assert_eq!(OutputFormat::from_str("CANONICAL", true), Ok(OutputFormat::Canonical));
        assert!(OutputFormat::from_str("yaml", true).is_err());
    }
}
