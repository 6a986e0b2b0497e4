#![no_main]

use std::collections::BTreeMap;
use std::path::Path;

use libfuzzer_sys::fuzz_target;
use registry_reconcile::domain::services::ReferenceResolver;
use registry_reconcile::domain::value_objects::ResourcePath;
use registry_reconcile::infrastructure::decode_document;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Arbitrary YAML must decode or fail, and resolving it never panics
        if let Ok(value) = decode_document(Path::new("fuzz.yml"), content) {
            let mut documents = BTreeMap::new();
            documents.insert(ResourcePath::new("dp/fuzz.yml"), value);
            let _ = ReferenceResolver::resolve(&documents);
        }
    }
});
