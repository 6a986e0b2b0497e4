//! Event spec compatibility
//!
//! Builds compatibility requests from the inline event and entity schemas
//! of a data product's event specs, and turns the oracle's answers into
//! diagnostics at the pointer of the schema that was checked. The oracle
//! call itself belongs to the caller.

use std::collections::BTreeMap;

use crate::domain::entities::{DataProduct, Diagnostic};
use crate::domain::ports::{CompatCheckable, CompatResult, CompatStatus};

/// One oracle call for one event spec
#[derive(Debug, Clone, PartialEq)]
pub struct CompatRequest {
    pub spec_index: usize,
    pub event: CompatCheckable,
    pub entities: Vec<CompatCheckable>,
    /// Schema source → pointer of the inline schema in the document
    pub pointers: BTreeMap<String, String>,
}

/// Requests for every event spec with an inline event schema.
///
/// Specs with entity rules but no event rules cannot be checked; each
/// gets a warning instead of a request.
pub fn build_compat_requests(dp: &DataProduct) -> (Vec<CompatRequest>, Vec<Diagnostic>) {
    let mut requests = Vec::new();
    let mut warnings = Vec::new();

    for (i, spec) in dp.data.event_specifications.iter().enumerate() {
        let mut pointers = BTreeMap::new();
        let mut entities = Vec::new();

        let event = spec.event.as_ref().and_then(|event| {
            event.rules().map(|schema| {
                pointers.insert(
                    event.source.clone(),
                    format!("/data/eventSpecifications/{i}/event/schema"),
                );
                CompatCheckable {
                    source: event.source.clone(),
                    schema: schema.clone(),
                }
            })
        });

        for (kind, j, entity) in spec.entities.iter_tagged() {
            if let Some(schema) = entity.rules() {
                pointers.insert(
                    entity.source.clone(),
                    format!("/data/eventSpecifications/{i}/entities/{kind}/{j}/schema"),
                );
                entities.push(CompatCheckable {
                    source: entity.source.clone(),
                    schema: schema.clone(),
                });
            }
        }

        match event {
            Some(event) => requests.push(CompatRequest {
                spec_index: i,
                event,
                entities,
                pointers,
            }),
            None if !entities.is_empty() => warnings.push(
                Diagnostic::warning(
                    "will not run compatibility checks on entities without an event defined",
                )
                .at(format!("/data/eventSpecifications/{i}")),
            ),
            None => {}
        }
    }

    (requests, warnings)
}

/// Diagnostics for one oracle answer
///
/// `incompatible` is an error and `undecidable` a warning, both for whole
/// sources and for individual properties. Sources the request did not
/// send are ignored.
pub fn interpret_compat(request: &CompatRequest, result: &CompatResult) -> Vec<Diagnostic> {
    let mut out = Vec::new();

    for source in &result.sources {
        let Some(pointer) = request.pointers.get(&source.source) else {
            continue;
        };

        match source.status {
            CompatStatus::Incompatible => out.push(
                Diagnostic::error(format!(
                    "definition incompatible with source data structure ({})",
                    source.source
                ))
                .at(pointer.clone()),
            ),
            CompatStatus::Undecidable => out.push(
                Diagnostic::warning(format!(
                    "definition has unknown compatibility with source data structure ({})",
                    source.source
                ))
                .at(pointer.clone()),
            ),
            CompatStatus::Compatible | CompatStatus::Unknown => {}
        }

        for (property, status) in &source.properties {
            let at = format!("{pointer}/{property}");
            match status {
                CompatStatus::Incompatible => out.push(
                    Diagnostic::error(format!(
                        "definition incompatible with .{property} in source data structure ({})",
                        source.source
                    ))
                    .at(at),
                ),
                CompatStatus::Undecidable => out.push(
                    Diagnostic::warning(format!(
                        "definition has unknown compatibility with .{property} in source data structure ({})",
                        source.source
                    ))
                    .at(at),
                ),
                CompatStatus::Compatible | CompatStatus::Unknown => {}
            }
        }
    }

    out
}
