#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 8192 { return; }
    if let Ok(req) = bsonfilter::parse_request(data) {
        // Empty sort/projection mappings must surface as absent
        assert!(req.sort.as_ref().is_none_or(|d| !d.is_empty()));
        assert!(req.projection.as_ref().is_none_or(|d| !d.is_empty()));
    }
});
