#![no_main]

use libfuzzer_sys::fuzz_target;
use registry_reconcile::{canonical_json, ContentHash};

fuzz_target!(|data: &[u8]| {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) {
        // Canonical form is always valid JSON
        let canonical = canonical_json(&value);
        assert!(serde_json::from_str::<serde_json::Value>(&canonical).is_ok());
        let _ = ContentHash::of_value(&value);
    }
});
