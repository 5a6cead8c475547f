use std::fmt;

use bson::{Bson, Document, doc};
use serde::de::value::MapAccessDeserializer;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use serde_json::value::RawValue;

use super::parse::parse_filter;
use crate::errors::FilterError;
use crate::types::int_to_bson;

/// Field name to integer mapping, kept in the order the client wrote it.
///
/// Used for sort directions (`1`/`-1`) and projection flags (`0`/`1`). Order matters for
/// compound sorts, so this is decoded entry by entry rather than through a hash map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSpec(Vec<(String, i64)>);

impl FieldSpec {
    #[must_use]
    pub fn fields(&self) -> &[(String, i64)] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `None` when there are no fields, so "no clause" stays distinct from an empty clause.
    #[must_use]
    pub fn into_document(self) -> Option<Document> {
        if self.0.is_empty() {
            return None;
        }
        Some(self.0.into_iter().map(|(k, v)| (k, int_to_bson(v))).collect())
    }
}

impl<'de> Deserialize<'de> for FieldSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldSpecVisitor;

        impl<'de> Visitor<'de> for FieldSpecVisitor {
            type Value = FieldSpec;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping field names to integers")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<FieldSpec, A::Error> {
                let mut fields = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, n)) = access.next_entry::<String, i64>()? {
                    fields.push((name, n));
                }
                Ok(FieldSpec(fields))
            }
        }

        deserializer.deserialize_map(FieldSpecVisitor)
    }
}

/// Wire form of a query request.
///
/// `filter` is kept as raw JSON and handed to [`parse_filter`]; unknown fields are ignored.
/// Only a JSON object is accepted.
#[derive(Debug, Default, Deserialize)]
#[serde(remote = "Self")]
pub struct QueryEnvelope {
    #[serde(default)]
    pub filter: Option<Box<RawValue>>,
    #[serde(default)]
    pub sort: Option<FieldSpec>,
    #[serde(default)]
    pub projection: Option<FieldSpec>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub skip: Option<i64>,
}

impl<'de> Deserialize<'de> for QueryEnvelope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EnvelopeVisitor;

        impl<'de> Visitor<'de> for EnvelopeVisitor {
            type Value = QueryEnvelope;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a request object")
            }

            fn visit_map<A: MapAccess<'de>>(self, access: A) -> Result<QueryEnvelope, A::Error> {
                QueryEnvelope::deserialize(MapAccessDeserializer::new(access))
            }
        }

        // The derived impl also takes sequences positionally; go through maps only.
        deserializer.deserialize_map(EnvelopeVisitor)
    }
}

impl QueryEnvelope {
    /// # Errors
    /// Propagates the filter's [`FilterError::Decode`] unchanged.
    pub fn into_request(self) -> Result<ParsedRequest, FilterError> {
        let filter = match &self.filter {
            Some(raw) => parse_filter(raw.get().as_bytes())?,
            None => Document::new(),
        };
        Ok(ParsedRequest {
            filter,
            sort: self.sort.and_then(FieldSpec::into_document),
            projection: self.projection.and_then(FieldSpec::into_document),
            limit: self.limit,
            skip: self.skip,
        })
    }
}

pub type RequestParts = (Document, Option<Document>, Option<Document>, Option<i64>, Option<i64>);

/// A decoded request, ready for a query execution layer.
///
/// `sort`/`projection` are `None` when the client asked for no such clause. `limit` and
/// `skip` are passed through without range checks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedRequest {
    pub filter: Document,
    pub sort: Option<Document>,
    pub projection: Option<Document>,
    pub limit: Option<i64>,
    pub skip: Option<i64>,
}

impl ParsedRequest {
    /// Returns `(filter, sort, projection, limit, skip)`.
    #[must_use]
    pub fn into_parts(self) -> RequestParts {
        (self.filter, self.sort, self.projection, self.limit, self.skip)
    }

    /// Every present clause as one document; absent clauses are left out.
    #[must_use]
    pub fn to_document(&self) -> Document {
        let mut out = doc! { "filter": self.filter.clone() };
        if let Some(sort) = &self.sort {
            out.insert("sort", sort.clone());
        }
        if let Some(projection) = &self.projection {
            out.insert("projection", projection.clone());
        }
        if let Some(skip) = self.skip {
            out.insert("skip", skip);
        }
        if let Some(limit) = self.limit {
            out.insert("limit", limit);
        }
        out
    }

    /// Builds a `find` command against `collection`.
    #[must_use]
    pub fn to_find_command(&self, collection: &str) -> Document {
        let mut cmd = doc! { "find": collection };
        cmd.extend(self.to_document());
        cmd
    }
}

/// Parses a request envelope and its filter.
///
/// # Errors
/// Returns [`FilterError::Envelope`] if the envelope itself is not valid, or the filter's
/// [`FilterError::Decode`].
pub fn parse_request(body: &[u8]) -> Result<ParsedRequest, FilterError> {
    let envelope: QueryEnvelope = serde_json::from_slice(body).map_err(FilterError::Envelope)?;
    envelope.into_request()
}

/// # Errors
/// See [`parse_request`].
pub fn parse_request_str(json: &str) -> Result<ParsedRequest, FilterError> {
    parse_request(json.as_bytes())
}

impl From<ParsedRequest> for Bson {
    fn from(req: ParsedRequest) -> Self {
        Self::Document(req.to_document())
    }
}
