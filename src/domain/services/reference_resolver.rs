//! Reference resolver
//!
//! Sorts decoded documents into data products and source applications,
//! then resolves every `$ref` a data product makes to a source application
//! file. Event specs may exclude source applications, but only ones their
//! parent data product includes.
//!
//! Problems are reported as diagnostics on the referencing file; one bad
//! file never stops the others from resolving.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use serde_json::Value;

use crate::domain::entities::{DataProduct, Diagnostic, DiagnosticReport, SourceApp};
use crate::domain::value_objects::ResourcePath;

pub const API_VERSION: &str = "v1";
pub const DATA_PRODUCT: &str = "data-product";
pub const SOURCE_APPLICATION: &str = "source-application";

/// Resolved references of one event spec
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSpecRefs {
    pub resource_name: String,
    /// Always a subset of the parent's `source_apps`
    pub excluded: BTreeSet<ResourcePath>,
}

/// Resolved references of one data product
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRefs {
    pub source_apps: BTreeSet<ResourcePath>,
    /// In document order, parallel to `data.eventSpecifications`
    pub event_specs: Vec<EventSpecRefs>,
}

impl ProductRefs {
    /// Source applications an event spec applies to: the product's set
    /// minus the event spec's exclusions, sorted
    pub fn effective_source_apps(&self, spec_index: usize) -> Vec<&ResourcePath> {
        let excluded = self.event_specs.get(spec_index).map(|s| &s.excluded);
        self.source_apps
            .iter()
            .filter(|sa| excluded.is_none_or(|ex| !ex.contains(*sa)))
            .collect()
    }
}

/// Data product file → resolved source application files
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReferenceGraph {
    pub products: BTreeMap<ResourcePath, ProductRefs>,
}

/// Everything learned from one pass over the local documents
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub data_products: BTreeMap<ResourcePath, DataProduct>,
    pub source_apps: BTreeMap<ResourcePath, SourceApp>,
    pub graph: ReferenceGraph,
    pub diagnostics: DiagnosticReport,
}

impl Resolution {
    /// True when no reference failed to resolve and no document was rejected
    pub fn is_clean(&self) -> bool {
        !self.diagnostics.has_errors()
    }
}

/// Pure resolver over decoded documents
pub struct ReferenceResolver;

impl ReferenceResolver {
    pub fn resolve(documents: &BTreeMap<ResourcePath, Value>) -> Resolution {
        let mut resolution = Resolution::default();

        for (file, document) in documents {
            Self::classify(file, document, &mut resolution);
        }

        let products: Vec<(ResourcePath, ProductRefs, Vec<Diagnostic>)> = resolution
            .data_products
            .iter()
            .map(|(file, dp)| {
                let (refs, diagnostics) = Self::resolve_product(file, dp, &resolution.source_apps);
                (file.clone(), refs, diagnostics)
            })
            .collect();

        for (file, refs, diagnostics) in products {
            resolution.diagnostics.extend(&file, diagnostics);
            resolution.graph.products.insert(file, refs);
        }

        resolution
    }

    fn classify(file: &ResourcePath, document: &Value, resolution: &mut Resolution) {
        let api_version = document.get("apiVersion").and_then(Value::as_str);
        if api_version != Some(API_VERSION) {
            resolution.diagnostics.push(
                file,
                Diagnostic::error(format!(
                    "ignoring, unknown or missing apiVersion: {}",
                    api_version.unwrap_or("<missing>")
                ))
                .at("/apiVersion"),
            );
            return;
        }

        let Some(resource_type) = document.get("resourceType") else {
            resolution
                .diagnostics
                .push(file, Diagnostic::error("missing resourceType").at("/resourceType"));
            return;
        };

        match resource_type.as_str() {
            Some(DATA_PRODUCT) => match serde_json::from_value::<DataProduct>(document.clone()) {
                Ok(dp) => {
                    resolution.data_products.insert(file.clone(), dp);
                }
                Err(e) => resolution.diagnostics.push(
                    file,
                    Diagnostic::error(format!("failed to decode data product {e}")),
                ),
            },
            Some(SOURCE_APPLICATION) => {
                match serde_json::from_value::<SourceApp>(document.clone()) {
                    Ok(sa) => {
                        resolution.source_apps.insert(file.clone(), sa);
                    }
                    Err(e) => resolution.diagnostics.push(
                        file,
                        Diagnostic::error(format!("failed to decode source application {e}")),
                    ),
                }
            }
            _ => {
                let name = resource_type
                    .as_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| resource_type.to_string());
                resolution.diagnostics.push(
                    file,
                    Diagnostic::debug(format!("ignoring, unknown resourceType: {name}")),
                );
            }
        }
    }

    fn resolve_product(
        file: &ResourcePath,
        dp: &DataProduct,
        source_apps: &BTreeMap<ResourcePath, SourceApp>,
    ) -> (ProductRefs, Vec<Diagnostic>) {
        let base = file.parent();
        let mut refs = ProductRefs::default();
        let mut diagnostics = Vec::new();

        for (i, sa_ref) in dp.data.source_applications.iter().enumerate() {
            let pointer = format!("/data/sourceApplications/{i}");
            if sa_ref.reference.is_empty() {
                diagnostics.push(Diagnostic::error("source application entry without $ref").at(pointer));
                continue;
            }

            let target = file.resolve_sibling(&sa_ref.reference);
            if source_apps.contains_key(&target) {
                refs.source_apps.insert(target);
            } else {
                let available: BTreeSet<String> =
                    source_apps.keys().map(|p| p.relative_to(&base)).collect();
                diagnostics.push(
                    Diagnostic::error(format!(
                        "source application $ref not found {}, available list {}",
                        sa_ref.reference,
                        bracketed(available.iter())
                    ))
                    .at(pointer),
                );
            }
        }

        for (i, spec) in dp.data.event_specifications.iter().enumerate() {
            let mut spec_refs = EventSpecRefs {
                resource_name: spec.resource_name.clone(),
                excluded: BTreeSet::new(),
            };

            for (j, excluded) in spec.excluded_source_applications.iter().enumerate() {
                let pointer = format!("/data/eventSpecifications/{i}/excludedSourceApplications/{j}");
                if excluded.reference.is_empty() {
                    diagnostics.push(Diagnostic::error("excluded source application entry without $ref").at(pointer));
                    continue;
                }

                let target = file.resolve_sibling(&excluded.reference);
                if refs.source_apps.contains(&target) {
                    spec_refs.excluded.insert(target);
                } else {
                    let available: Vec<String> =
                        refs.source_apps.iter().map(|p| p.relative_to(&base)).collect();
                    diagnostics.push(
                        Diagnostic::error(format!(
                            "event spec source app not in parent data product list (event spec: {}, source app: {}), available list {}",
                            spec.resource_name,
                            excluded.reference,
                            bracketed(available.iter())
                        ))
                        .at(pointer),
                    );
                }
            }

            refs.event_specs.push(spec_refs);
        }

        (refs, diagnostics)
    }
}

fn bracketed<'a>(items: impl Iterator<Item = &'a String>) -> String {
    let joined: Vec<&str> = items.map(String::as_str).collect();
    format!("[{}]", joined.join(", "))
}
