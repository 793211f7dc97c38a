#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use swatch::infrastructure::design_dump::{DesignDump, DesignDumpImporter};

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        let file = Path::new("fuzz.json");
        if let Ok(dump) = DesignDump::parse(content, file) {
            // Import either yields a definition or a dump error
            let _ = DesignDumpImporter::new("assets").import(&dump, file);
        }
    }
});
