//! Remote registry records
//!
//! Shapes returned by the registry for schemas (listing + deployment
//! history) and for data products, event specs and source applications.
//! Decoding is tolerant: unknown fields are ignored and missing optional
//! fields default.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::value_objects::{Environment, SchemaKey};

use super::DataStructureMeta;

/// One `(version, environment)` deployment of a schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    pub version: String,
    pub env: Environment,
    #[serde(default)]
    pub content_hash: String,
}

/// A schema as listed by the registry
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoteListingEntry {
    /// Registry-side resource id, used to fetch full deployment history
    pub hash: String,
    pub vendor: String,
    pub name: String,
    pub format: String,
    pub meta: DataStructureMeta,
    pub deployments: Vec<Deployment>,
}

impl RemoteListingEntry {
    pub fn key(&self) -> SchemaKey {
        SchemaKey::new(&self.vendor, &self.name, &self.format)
    }

    /// First deployment recorded for `env`
    pub fn deployment_for(&self, env: &Environment) -> Option<&Deployment> {
        self.deployments.iter().find(|d| &d.env == env)
    }
}

/// Inline event or entity reference on a remote event spec
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoteEntity {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_cardinality: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_cardinality: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteEntities {
    pub tracked: Vec<RemoteEntity>,
    pub enriched: Vec<RemoteEntity>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoteTrigger {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub app_ids: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoteSourceApplication {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub owner: String,
    pub app_ids: Vec<String>,
    pub entities: RemoteEntities,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EventSpecReference {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoteDataProduct {
    pub id: String,
    pub name: String,
    pub status: String,
    #[serde(rename = "sourceApplications")]
    pub source_application_ids: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub domain: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub owner: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub event_specs: Vec<EventSpecReference>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub lock_status: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub managed_from: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoteEventSpec {
    pub id: String,
    #[serde(rename = "sourceApplications")]
    pub source_application_ids: Vec<String>,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub triggers: Vec<RemoteTrigger>,
    pub status: String,
    pub version: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<RemoteEntity>,
    pub entities: RemoteEntities,
    pub data_product_id: String,
}

/// Everything the registry holds about data products
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductListing {
    pub data_products: Vec<RemoteDataProduct>,
    pub event_specs: Vec<RemoteEventSpec>,
    pub source_applications: Vec<RemoteSourceApplication>,
}
