#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        let _ = swatch::Target::parse_loose(content);
        let _ = serde_json::from_str::<swatch::Target>(content);
    }
});
