//! Property tests for reference resolution.

use std::collections::BTreeMap;

use proptest::prelude::*;
use serde_json::{json, Value};

use registry_reconcile::domain::services::ReferenceResolver;
use registry_reconcile::domain::value_objects::ResourcePath;

const APPS: usize = 4;

fn source_app(i: usize) -> Value {
    json!({
        "apiVersion": "v1",
        "resourceType": "source-application",
        "resourceName": format!("00000000-0000-4000-8000-00000000000{i}"),
        "data": {"name": format!("App {i}"), "appIds": [format!("app-{i}")]}
    })
}

fn documents(refs: &[String]) -> BTreeMap<ResourcePath, Value> {
    let mut documents: BTreeMap<ResourcePath, Value> = (0..APPS)
        .map(|i| (ResourcePath::new(format!("sa/app{i}.yml")), source_app(i)))
        .collect();
    let entries: Vec<Value> = refs.iter().map(|r| json!({"$ref": r})).collect();
    documents.insert(
        ResourcePath::new("dp/shop.yml"),
        json!({
            "apiVersion": "v1",
            "resourceType": "data-product",
            "resourceName": "0e6e8f64-3a8e-4c38-9d1a-7f3c2b1a0d9e",
            "data": {"name": "Shop", "sourceApplications": entries}
        }),
    );
    documents
}

/// Refs to existing apps (`../sa/appN.yml`) mixed with missing ones
fn refs() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(0usize..APPS + 2, 0..8).prop_map(|indices| {
        indices
            .into_iter()
            .map(|i| format!("../sa/app{i}.yml"))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the order of a product's source application refs never
    /// changes what it resolves to.
    #[test]
    fn property_ref_order_is_irrelevant(
        (original, shuffled) in refs().prop_flat_map(|r| (Just(r.clone()), Just(r).prop_shuffle()))
    ) {
        let a = ReferenceResolver::resolve(&documents(&original));
        let b = ReferenceResolver::resolve(&documents(&shuffled));

        prop_assert_eq!(&a.graph, &b.graph);
        prop_assert_eq!(a.diagnostics.error_count(), b.diagnostics.error_count());
    }

    /// PROPERTY: resolved apps are exactly the referenced files that exist.
    #[test]
    fn property_resolved_apps_exist(refs in refs()) {
        let resolution = ReferenceResolver::resolve(&documents(&refs));
        let product = &resolution.graph.products[&ResourcePath::new("dp/shop.yml")];

        for app in &product.source_apps {
            prop_assert!(resolution.source_apps.contains_key(app));
        }
        let missing = refs
            .iter()
            .filter(|r| !(0..APPS).any(|i| **r == format!("../sa/app{i}.yml")))
            .count();
        prop_assert_eq!(resolution.diagnostics.error_count(), missing);
    }
}
