//! Data product and source application rules
//!
//! Per-document checks producing diagnostics with JSON pointers. Source
//! application entities must point at deployed schemas, which goes through
//! the deploy checker; a failing history fetch aborts the check.

use crate::domain::entities::{DataProduct, Diagnostic, SchemaRef, SourceApp};
use crate::domain::value_objects::IgluUri;

use super::deploy_checker::{DeployCheckError, DeployStatus, SchemaDeployChecker};

/// Display cap for alternative versions in "could not find deployment"
pub const DEFAULT_ALTERNATIVES_LIMIT: usize = 5;

pub fn data_product_rules(dp: &DataProduct) -> Vec<Diagnostic> {
    let mut out = Vec::new();

    if uuid::Uuid::parse_str(&dp.resource_name).is_err() {
        out.push(Diagnostic::error("resourceName must be a valid uuid").at("/resourceName"));
    }
    if dp.data.name.is_empty() {
        out.push(Diagnostic::error("data.name required").at("/data/name"));
    }

    for (i, spec) in dp.data.event_specifications.iter().enumerate() {
        let base = format!("/data/eventSpecifications/{i}");
        if spec.resource_name.is_empty() {
            out.push(Diagnostic::error("resourceName required").at(format!("{base}/resourceName")));
        }
        if spec.name.is_empty() {
            out.push(Diagnostic::error("name required").at(format!("{base}/name")));
        }
        if let Some(event) = &spec.event {
            if !event.is_empty() && !IgluUri::is_well_formed(&event.source) {
                out.push(invalid_uri().at(format!("{base}/event/source")));
            }
        }
        for (kind, j, entity) in spec.entities.iter_tagged() {
            let pointer = format!("{base}/entities/{kind}/{j}");
            if entity.source.is_empty() {
                out.push(Diagnostic::error("source required").at(format!("{pointer}/source")));
            } else if !IgluUri::is_well_formed(&entity.source) {
                out.push(invalid_uri().at(format!("{pointer}/source")));
            }
            out.extend(cardinality(entity, &pointer));
        }
    }

    out
}

/// Shape rules that need no registry access
pub fn source_app_rules(sa: &SourceApp) -> Vec<Diagnostic> {
    let mut out = Vec::new();

    if uuid::Uuid::parse_str(&sa.resource_name).is_err() {
        out.push(Diagnostic::error("resourceName must be a valid uuid").at("/resourceName"));
    }
    if sa.data.name.is_empty() {
        out.push(Diagnostic::error("data.name required").at("/data/name"));
    }
    for (i, app_id) in sa.data.app_ids.iter().enumerate() {
        if app_id.is_empty() {
            out.push(Diagnostic::error("app id can't be empty").at(format!("/data/appIds/{i}")));
        }
    }

    let Some(entities) = &sa.data.entities else {
        return out;
    };

    for (kind, i, entity) in entities.iter_tagged() {
        let pointer = format!("/data/entities/{kind}/{i}");
        if entity.source.is_empty() {
            out.push(Diagnostic::error("source required").at(format!("{pointer}/source")));
        }
        out.extend(cardinality(entity, &pointer));
        if entity.schema.is_some() {
            out.push(
                Diagnostic::error("property rules unsupported for source applications")
                    .at(format!("{pointer}/schema")),
            );
        }
    }

    out
}

/// Every entity source must be a well-formed URI of a deployed schema
pub fn source_app_deployments(
    sa: &SourceApp,
    checker: &SchemaDeployChecker<'_>,
    display_limit: usize,
) -> Result<Vec<Diagnostic>, DeployCheckError> {
    let mut out = Vec::new();
    let Some(entities) = &sa.data.entities else {
        return Ok(out);
    };

    for (kind, i, entity) in entities.iter_tagged() {
        if entity.source.is_empty() {
            continue;
        }
        let pointer = format!("/data/entities/{kind}/{i}/source");
        if !IgluUri::is_well_formed(&entity.source) {
            out.push(invalid_uri().at(pointer));
            continue;
        }

        if let DeployStatus::Missing { alternatives } = checker.check(&entity.source)? {
            let message = if alternatives.is_empty() {
                format!("could not find deployment of {}", entity.source)
            } else {
                let versions: Vec<String> = alternatives.into_iter().collect();
                format!(
                    "could not find deployment of {}, available versions ({})",
                    entity.source,
                    truncate_list(&versions, display_limit)
                )
            };
            out.push(Diagnostic::error(message).at(pointer));
        }
    }

    Ok(out)
}

/// `a, b, c, ...N more` once `items` exceeds `limit`
pub fn truncate_list(items: &[String], limit: usize) -> String {
    if items.len() <= limit {
        return items.join(", ");
    }
    let more = items.len() - limit;
    if limit == 0 {
        format!("...{more} more")
    } else {
        format!("{}, ...{more} more", items[..limit].join(", "))
    }
}

fn invalid_uri() -> Diagnostic {
    Diagnostic::error(
        "invalid iglu uri should follow the format iglu:vendor/name/format/version, eg: iglu:io.snowplow/login/jsonschema/1-0-0",
    )
}

fn cardinality(entity: &SchemaRef, pointer: &str) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    match (entity.min_cardinality, entity.max_cardinality) {
        (Some(min), max) => {
            if min < 0 {
                out.push(
                    Diagnostic::error("minCardinality must be >= 0")
                        .at(format!("{pointer}/minCardinality")),
                );
            }
            if let Some(max) = max.filter(|max| *max < min) {
                out.push(
                    Diagnostic::error(format!(
                        "maxCardinality {max} must be >= minCardinality {min}"
                    ))
                    .at(format!("{pointer}/maxCardinality")),
                );
            }
        }
        (None, Some(_)) => out.push(
            Diagnostic::error("maxCardinality without minCardinality")
                .at(format!("{pointer}/maxCardinality")),
        ),
        (None, None) => {}
    }
    out
}
