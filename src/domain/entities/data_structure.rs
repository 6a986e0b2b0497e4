//! DataStructure entity - a locally authored schema document
//!
//! The file body has a mutable `meta` block and a versioned `data` block.
//! Only `data` is hashed; `meta` is compared structurally.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::value_objects::{ContentHash, SchemaKey, SchemaVersion, VersionError};

/// Unversioned metadata attached to a schema
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataStructureMeta {
    pub hidden: bool,
    pub schema_type: String,
    /// Missing and empty compare equal
    pub custom_data: BTreeMap<String, String>,
}

/// A schema document as authored on disk
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataStructure {
    pub api_version: String,
    pub resource_type: String,
    pub meta: DataStructureMeta,
    /// Raw payload, kept untyped so unknown fields hash and round-trip as written
    pub data: Map<String, Value>,
}

/// `data.self` identity block
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataStructureSelf {
    pub vendor: String,
    pub name: String,
    pub format: String,
    pub version: String,
}

impl DataStructureSelf {
    pub fn key(&self) -> SchemaKey {
        SchemaKey::new(&self.vendor, &self.name, &self.format)
    }

    pub fn parsed_version(&self) -> Result<SchemaVersion, VersionError> {
        SchemaVersion::parse(&self.version)
    }
}

/// Typed view over `data`; everything but `self` and `$schema` lands in `other`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataStructureData {
    #[serde(rename = "self", default)]
    pub self_: DataStructureSelf,
    #[serde(rename = "$schema", default)]
    pub schema: String,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl DataStructure {
    /// Decode the `data` block into its typed view
    pub fn parse_data(&self) -> Result<DataStructureData, serde_json::Error> {
        serde_json::from_value(Value::Object(self.data.clone()))
    }

    /// Hash of the `data` block only
    pub fn content_hash(&self) -> ContentHash {
        ContentHash::of_value(&Value::Object(self.data.clone()))
    }
}
