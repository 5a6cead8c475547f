// Submodules for separation of concerns
pub mod coerce;
pub mod extjson;
mod parse;
mod request;

// Public API re-exports
pub use coerce::{coerce, coerce_document, coerce_object_id};
pub use extjson::{TYPE_WRAPPER_KEYS, decode_extended, has_type_wrapper};
pub use parse::{lift, lift_object, parse_filter, parse_filter_str};
pub use request::{
    FieldSpec, ParsedRequest, QueryEnvelope, RequestParts, parse_request, parse_request_str,
};
