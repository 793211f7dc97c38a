#![no_main]

use libfuzzer_sys::fuzz_target;
use swatch::domain::services::stdlib::color;

fuzz_target!(|data: &[u8]| {
    if let Ok(value) = std::str::from_utf8(data) {
        if let Ok(hsla) = color::parse(value) {
            assert!((0.0..=1.0).contains(&hsla.a));
        }
    }
});
