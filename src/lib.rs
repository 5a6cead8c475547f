//! Query payload parsing for document databases.
//!
//! Turns a client-supplied filter (MongoDB Extended JSON, or plain JSON as a fallback) into
//! an ordered [`bson::Document`], and decodes request envelopes that bundle a filter with
//! sort, projection, limit and skip.
//!
//! ```
//! let req = bsonfilter::parse_request_str(
//!     r#"{"filter":{"age":{"$gt":21}},"sort":{"age":-1},"limit":10}"#,
//! )
//! .unwrap();
//! assert_eq!(req.filter, bson::doc! { "age": { "$gt": 21 } });
//! assert_eq!(req.sort, Some(bson::doc! { "age": -1 }));
//! assert_eq!(req.projection, None);
//! assert_eq!(req.limit, Some(10));
//! ```

pub mod config;
pub mod errors;
pub mod filter;
pub mod logger;
pub mod render;
pub mod types;

pub use errors::{ExtendedJsonError, FilterDecodeError, FilterError};
pub use filter::{
    ParsedRequest, QueryEnvelope, parse_filter, parse_filter_str, parse_request,
    parse_request_str,
};
pub use types::OrderedDocument;
