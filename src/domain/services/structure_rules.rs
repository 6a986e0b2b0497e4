//! Local data structure rules
//!
//! Shape checks run before classification. All problems across all files
//! are collected; nothing short-circuits.

use std::collections::BTreeMap;

use crate::domain::entities::{DataStructure, FileError};
use crate::domain::value_objects::ResourcePath;

const API_VERSIONS: &[&str] = &["v1"];
const RESOURCE_TYPES: &[&str] = &["data-structure"];
const SCHEMA_TYPES: &[&str] = &["event", "entity"];
const FORMATS: &[&str] = &["jsonschema"];

/// Validate every local schema and the file ↔ schema mapping
pub fn validate_local_structures(locals: &BTreeMap<ResourcePath, DataStructure>) -> Vec<FileError> {
    let mut errors = Vec::new();
    let mut owners: BTreeMap<String, Vec<&ResourcePath>> = BTreeMap::new();

    for (file, ds) in locals {
        let mut problems = Vec::new();

        one_of(&mut problems, "dataStructure.apiVersion", &ds.api_version, API_VERSIONS);
        one_of(&mut problems, "dataStructure.resourceType", &ds.resource_type, RESOURCE_TYPES);
        one_of(&mut problems, "dataStructure.meta.schemaType", &ds.meta.schema_type, SCHEMA_TYPES);

        if ds.data.is_empty() {
            problems.push(missing("dataStructure.data"));
        }

        match ds.parse_data() {
            Ok(data) => {
                if data.schema.is_empty() {
                    problems.push(missing("dataStructure.data.$schema"));
                }
                required(&mut problems, "dataStructure.data.self.vendor", &data.self_.vendor);
                required(&mut problems, "dataStructure.data.self.name", &data.self_.name);
                one_of(&mut problems, "dataStructure.data.self.format", &data.self_.format, FORMATS);
                if data.self_.version.is_empty() {
                    problems.push(missing("dataStructure.data.self.version"));
                } else if let Err(e) = data.self_.parsed_version() {
                    problems.push(format!("dataStructure.data.self.version: {e}"));
                }

                owners
                    .entry(data.self_.key().vendor_name())
                    .or_default()
                    .push(file);
            }
            Err(e) => problems.push(format!("dataStructure.data could not be read: {e}")),
        }

        errors.extend(problems.into_iter().map(|p| FileError::new(file.clone(), p)));
    }

    for (key, files) in owners {
        if let [first, _, ..] = files.as_slice() {
            let listed: Vec<&str> = files.iter().map(|f| f.as_str()).collect();
            errors.push(FileError::new(
                (*first).clone(),
                format!(
                    "the mapping between data structures and files should be unique. Files [{}] describe the same data structure {key}",
                    listed.join(", ")
                ),
            ));
        }
    }

    errors
}

fn missing(path: &str) -> String {
    format!("required field {path} is missing")
}

fn required(problems: &mut Vec<String>, path: &str, value: &str) {
    if value.is_empty() {
        problems.push(missing(path));
    }
}

fn one_of(problems: &mut Vec<String>, path: &str, value: &str, allowed: &[&str]) {
    if value.is_empty() {
        problems.push(missing(path));
    } else if !allowed.contains(&value) {
        problems.push(format!(
            "invalid value {value} at {path}. Available values are: {}",
            allowed.join(", ")
        ));
    }
}
