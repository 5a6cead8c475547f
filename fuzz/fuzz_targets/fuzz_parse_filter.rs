#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 8192 { return; }
    // Must never panic; on success the result is a document whatever path was taken
    if let Ok(doc) = bsonfilter::parse_filter(data) {
        let _ = doc.len();
    }
});
