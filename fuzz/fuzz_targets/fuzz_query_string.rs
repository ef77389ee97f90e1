#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 8192 { return; }
    if let Ok(s) = std::str::from_utf8(data) {
        // Decoding, validation and parsing must never panic
        let schema = query_lite::Schema::from_query_str(s);
        let _ = schema.validate();
        let out = schema.parse();
        let _ = out.to_json();
        let _ = out.find_options();
    }
});
