//! Data product change planner
//!
//! Turns a resolved set of local product documents into registry payloads
//! and compares them, by id, against the registry's product listing.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use serde_json::{json, Value};

use crate::domain::entities::{
    DataProduct, EntitiesDef, EventSpec, ProductListing, RemoteDataProduct, RemoteEntities,
    RemoteEntity, RemoteEventSpec, RemoteSourceApplication, RemoteTrigger, SchemaRef, SourceApp,
};
use crate::domain::value_objects::{canonical_json, ResourcePath};

use super::reference_resolver::Resolution;

/// Planning refuses to run while references are broken
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{errors} reference error(s) must be fixed before planning data product changes")]
pub struct UnresolvedReferences {
    pub errors: usize,
}

/// Remote writes needed to bring the registry in line with local files
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductChangeSet {
    pub sa_create: Vec<RemoteSourceApplication>,
    pub sa_update: Vec<RemoteSourceApplication>,
    pub dp_create: Vec<RemoteDataProduct>,
    pub dp_update: Vec<RemoteDataProduct>,
    pub es_create: Vec<RemoteEventSpec>,
    pub es_update: Vec<RemoteEventSpec>,
    pub es_delete: Vec<RemoteEventSpec>,
    /// Resource id → file it came from. Deleted event specs have no file
    /// and map to their data product's remote name.
    pub attribution: BTreeMap<String, String>,
}

impl ProductChangeSet {
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn total(&self) -> usize {
        self.sa_create.len()
            + self.sa_update.len()
            + self.dp_create.len()
            + self.dp_update.len()
            + self.es_create.len()
            + self.es_update.len()
            + self.es_delete.len()
    }
}

pub struct ProductPlanner;

impl ProductPlanner {
    pub fn plan(
        resolution: &Resolution,
        remote: &ProductListing,
    ) -> Result<ProductChangeSet, UnresolvedReferences> {
        let errors = resolution.diagnostics.error_count();
        if errors > 0 {
            return Err(UnresolvedReferences { errors });
        }

        let mut changes = ProductChangeSet::default();

        let remote_sas: BTreeMap<&str, &RemoteSourceApplication> = remote
            .source_applications
            .iter()
            .map(|sa| (sa.id.as_str(), sa))
            .collect();
        let remote_dps: BTreeMap<&str, &RemoteDataProduct> = remote
            .data_products
            .iter()
            .map(|dp| (dp.id.as_str(), dp))
            .collect();
        let remote_ess: BTreeMap<&str, &RemoteEventSpec> = remote
            .event_specs
            .iter()
            .map(|es| (es.id.as_str(), es))
            .collect();

        for (file, sa) in &resolution.source_apps {
            let local = source_app_to_remote(sa);
            let target = match remote_sas.get(local.id.as_str()) {
                None => &mut changes.sa_create,
                Some(current) if fingerprint(*current) != fingerprint(&local) => {
                    &mut changes.sa_update
                }
                Some(_) => continue,
            };
            changes.attribution.insert(local.id.clone(), file.to_string());
            target.push(local);
        }

        let local_es_ids: BTreeSet<&str> = resolution
            .data_products
            .values()
            .flat_map(|dp| dp.data.event_specifications.iter())
            .map(|es| es.resource_name.as_str())
            .collect();

        for (file, dp) in &resolution.data_products {
            let Some(refs) = resolution.graph.products.get(file) else {
                continue;
            };
            let id_of = |path: &ResourcePath| {
                resolution
                    .source_apps
                    .get(path)
                    .map(|sa| sa.resource_name.clone())
            };

            let mut sa_ids: Vec<String> = refs.source_apps.iter().filter_map(id_of).collect();
            sa_ids.sort_unstable();
            let local = data_product_to_remote(dp, sa_ids);
            let remote_dp = remote_dps.get(local.id.as_str()).copied();
            let target = match remote_dp {
                None => Some(&mut changes.dp_create),
                Some(current) if dp_fingerprint(current) != dp_fingerprint(&local) => {
                    Some(&mut changes.dp_update)
                }
                Some(_) => None,
            };
            if let Some(target) = target {
                changes.attribution.insert(local.id.clone(), file.to_string());
                target.push(local);
            }

            for (i, spec) in dp.data.event_specifications.iter().enumerate() {
                let mut ids: Vec<String> = refs
                    .effective_source_apps(i)
                    .into_iter()
                    .filter_map(id_of)
                    .collect();
                ids.sort_unstable();
                let local = event_spec_to_remote(spec, ids, &dp.resource_name);
                let target = match remote_ess.get(local.id.as_str()) {
                    None => &mut changes.es_create,
                    Some(current) if es_fingerprint(current) != es_fingerprint(&local) => {
                        &mut changes.es_update
                    }
                    Some(_) => continue,
                };
                changes.attribution.insert(local.id.clone(), file.to_string());
                target.push(local);
            }

            let Some(remote_dp) = remote_dp else {
                continue;
            };
            for reference in &remote_dp.event_specs {
                if local_es_ids.contains(reference.id.as_str()) {
                    continue;
                }
                let deleted = remote_ess
                    .get(reference.id.as_str())
                    .map(|es| (*es).clone())
                    .unwrap_or_else(|| RemoteEventSpec {
                        id: reference.id.clone(),
                        data_product_id: remote_dp.id.clone(),
                        ..Default::default()
                    });
                changes
                    .attribution
                    .insert(deleted.id.clone(), remote_dp.name.clone());
                changes.es_delete.push(deleted);
            }
        }

        Ok(changes)
    }
}

pub fn source_app_to_remote(sa: &SourceApp) -> RemoteSourceApplication {
    RemoteSourceApplication {
        id: sa.resource_name.clone(),
        name: sa.data.name.clone(),
        description: sa.data.description.clone(),
        owner: sa.data.owner.clone(),
        app_ids: sa.data.app_ids.clone(),
        entities: sa
            .data
            .entities
            .as_ref()
            .map(entities_to_remote)
            .unwrap_or_default(),
    }
}

/// `source_app_ids` are the resolved ids in canonical order
pub fn data_product_to_remote(dp: &DataProduct, source_app_ids: Vec<String>) -> RemoteDataProduct {
    RemoteDataProduct {
        id: dp.resource_name.clone(),
        name: dp.data.name.clone(),
        source_application_ids: source_app_ids,
        domain: dp.data.domain.clone(),
        owner: dp.data.owner.clone(),
        description: dp.data.description.clone(),
        ..Default::default()
    }
}

pub fn event_spec_to_remote(
    spec: &EventSpec,
    source_app_ids: Vec<String>,
    data_product_id: &str,
) -> RemoteEventSpec {
    RemoteEventSpec {
        id: spec.resource_name.clone(),
        source_application_ids: source_app_ids,
        name: spec.name.clone(),
        description: spec.description.clone(),
        triggers: spec
            .triggers
            .iter()
            .map(|t| RemoteTrigger {
                id: t.id.clone(),
                description: t.description.clone(),
                app_ids: t.app_ids.clone(),
                url: t.url.clone(),
            })
            .collect(),
        event: spec
            .event
            .as_ref()
            .filter(|e| !e.is_empty())
            .map(entity_to_remote),
        entities: entities_to_remote(&spec.entities),
        data_product_id: data_product_id.to_string(),
        ..Default::default()
    }
}

fn entity_to_remote(entity: &SchemaRef) -> RemoteEntity {
    RemoteEntity {
        source: entity.source.clone(),
        min_cardinality: entity.min_cardinality,
        max_cardinality: entity.max_cardinality,
        schema: entity.schema.clone(),
    }
}

fn entities_to_remote(entities: &EntitiesDef) -> RemoteEntities {
    RemoteEntities {
        tracked: entities.tracked.iter().map(entity_to_remote).collect(),
        enriched: entities.enriched.iter().map(entity_to_remote).collect(),
    }
}

/// Canonical text of a payload; `1.0` and `1` compare equal
fn fingerprint<T: Serialize>(payload: &T) -> String {
    canonical_json(&serde_json::to_value(payload).unwrap_or_default())
}

fn sorted(ids: &[String]) -> Vec<&str> {
    let mut ids: Vec<&str> = ids.iter().map(String::as_str).collect();
    ids.sort_unstable();
    ids
}

fn dp_fingerprint(dp: &RemoteDataProduct) -> Value {
    json!({
        "name": dp.name,
        "sourceApplications": sorted(&dp.source_application_ids),
        "domain": dp.domain,
        "owner": dp.owner,
        "description": dp.description,
    })
}

fn es_fingerprint(es: &RemoteEventSpec) -> String {
    let event = es.event.as_ref().filter(|e| **e != RemoteEntity::default());
    fingerprint(&json!({
        "sourceApplications": sorted(&es.source_application_ids),
        "name": es.name,
        "description": es.description,
        "triggers": es.triggers,
        "event": event,
        "entities": es.entities,
        "dataProductId": es.data_product_id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::EventSpecReference;
    use crate::domain::services::ReferenceResolver;

    const DP: &str = "0e6e8f64-3a8e-4c38-9d1a-7f3c2b1a0d9e";
    const WEB: &str = "5a0b8a5e-1c3f-4d2b-9b6e-3f1e2d4c5b6a";
    const IOS: &str = "7c2d9b1f-4e5a-4b3c-8d2e-1f0a9b8c7d6e";

    fn source_app(id: &str, name: &str) -> Value {
        json!({
            "apiVersion": "v1",
            "resourceType": "source-application",
            "resourceName": id,
            "data": {"name": name, "appIds": [name]}
        })
    }

    fn product() -> Value {
        json!({
            "apiVersion": "v1",
            "resourceType": "data-product",
            "resourceName": DP,
            "data": {
                "name": "Shop",
                "sourceApplications": [{"$ref": "./web.yml"}, {"$ref": "./ios.yml"}],
                "eventSpecifications": [{
                    "resourceName": "es-checkout",
                    "name": "Checkout",
                    "excludedSourceApplications": [{"$ref": "./ios.yml"}],
                    "event": {"source": "iglu:com.acme/checkout/jsonschema/1-0-0",
                              "schema": {"type": "object", "maxProperties": 2.0}}
                }]
            }
        })
    }

    fn resolution() -> Resolution {
        let documents: BTreeMap<ResourcePath, Value> = [
            ("dp/shop.yml", product()),
            ("dp/web.yml", source_app(WEB, "web")),
            ("dp/ios.yml", source_app(IOS, "ios")),
        ]
        .into_iter()
        .map(|(p, v)| (ResourcePath::new(p), v))
        .collect();
        ReferenceResolver::resolve(&documents)
    }

    // === TDD: empty registry ===

    #[test]
    fn everything_is_created_against_an_empty_registry() {
        let changes = ProductPlanner::plan(&resolution(), &ProductListing::default()).unwrap();

        assert_eq!(changes.sa_create.len(), 2);
        assert_eq!(changes.dp_create.len(), 1);
        assert_eq!(changes.es_create.len(), 1);
        assert_eq!(changes.total(), 4);

        let mut expected = vec![WEB.to_string(), IOS.to_string()];
        expected.sort();
        assert_eq!(changes.dp_create[0].source_application_ids, expected);
        assert_eq!(changes.es_create[0].source_application_ids, vec![WEB.to_string()]);
        assert_eq!(changes.es_create[0].data_product_id, DP);
        assert_eq!(changes.attribution.get("es-checkout").map(String::as_str), Some("dp/shop.yml"));
    }

    // === TDD: registry in sync ===

    fn in_sync(changes: &ProductChangeSet) -> ProductListing {
        let mut dp = changes.dp_create[0].clone();
        dp.source_application_ids.reverse();
        dp.event_specs = vec![EventSpecReference { id: "es-checkout".to_string() }];
        let mut es = changes.es_create[0].clone();
        // registry returns integral numbers without a fraction
        if let Some(schema) = es.event.as_mut().and_then(|e| e.schema.as_mut()) {
            schema.insert("maxProperties".to_string(), json!(2));
        }
        ProductListing {
            data_products: vec![dp],
            event_specs: vec![es],
            source_applications: changes.sa_create.clone(),
        }
    }

    #[test]
    fn matching_registry_needs_no_changes() {
        let resolution = resolution();
        let first = ProductPlanner::plan(&resolution, &ProductListing::default()).unwrap();
        let remote = in_sync(&first);

        let changes = ProductPlanner::plan(&resolution, &remote).unwrap();
        assert!(changes.is_empty(), "{changes:?}");
    }

    #[test]
    fn renamed_source_app_is_updated() {
        let resolution = resolution();
        let first = ProductPlanner::plan(&resolution, &ProductListing::default()).unwrap();
        let mut remote = in_sync(&first);
        remote.source_applications[0].name = "old name".to_string();

        let changes = ProductPlanner::plan(&resolution, &remote).unwrap();
        assert_eq!(changes.sa_update.len(), 1);
        assert_eq!(changes.total(), 1);
    }

    #[test]
    fn remote_event_spec_missing_locally_is_deleted() {
        let resolution = resolution();
        let first = ProductPlanner::plan(&resolution, &ProductListing::default()).unwrap();
        let mut remote = in_sync(&first);
        remote.data_products[0]
            .event_specs
            .push(EventSpecReference { id: "es-gone".to_string() });
        remote.data_products[0].name = "Shop (remote)".to_string();

        let changes = ProductPlanner::plan(&resolution, &remote).unwrap();
        assert_eq!(changes.dp_update.len(), 1);
        assert_eq!(changes.es_delete.len(), 1);
        assert_eq!(changes.es_delete[0].id, "es-gone");
        assert_eq!(
            changes.attribution.get("es-gone").map(String::as_str),
            Some("Shop (remote)")
        );
    }

    // === TDD: preconditions ===

    #[test]
    fn broken_references_block_planning() {
        let documents = BTreeMap::from([(ResourcePath::new("dp/shop.yml"), product())]);
        let resolution = ReferenceResolver::resolve(&documents);

        let err = ProductPlanner::plan(&resolution, &ProductListing::default()).unwrap_err();
        // two dangling $refs plus the exclusion that now falls outside the product
        assert_eq!(err.errors, 3);
    }
}
