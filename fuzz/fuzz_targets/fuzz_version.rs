#![no_main]

use libfuzzer_sys::fuzz_target;
use registry_reconcile::domain::value_objects::{IgluUri, SchemaVersion};

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Parsed versions must print back to the same value
        if let Ok(version) = SchemaVersion::parse(content) {
            assert_eq!(SchemaVersion::parse(&version.to_string()), Ok(version));
        }
        let _ = IgluUri::parse(content);
    }
});
