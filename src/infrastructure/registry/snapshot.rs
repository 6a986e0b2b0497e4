//! Registry snapshot
//!
//! A recorded copy of registry state, read from a YAML or JSON file. It
//! implements every registry port so `plan`, `validate` and `products`
//! run offline, against fixtures in tests, or against an export taken
//! from a live registry.
//!
//! Oracle answers are recorded too. A migration with no recorded verdict
//! is `no-change`; a compatibility check with no recorded source is
//! compatible.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::entities::{DataStructureSelf, Deployment, ProductListing, RemoteListingEntry};
use crate::domain::ports::{
    CentralRepository, CompatCheckable, CompatResult, CompatSource, CompatStatus,
    DeploymentHistory, DestinationLister, EventSpecCompatChecker, MigrationOracle,
    MigrationVerdict, PortError, ProductRegistry, SchemaListing,
};
use crate::error::{ReconcileError, ReconcileResult};
use crate::infrastructure::fs::decode_document;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrySnapshot {
    pub listing: Vec<RemoteListingEntry>,
    /// Full deployment history by registry hash. Missing hashes fall back
    /// to the deployments recorded on the listing entry.
    pub histories: BTreeMap<String, Vec<Deployment>>,
    pub central: Vec<String>,
    pub destinations: Vec<String>,
    /// `vendor/name/format` → destination → verdict
    pub migrations: BTreeMap<String, BTreeMap<String, MigrationVerdict>>,
    /// Event or entity source URI → recorded outcome
    pub compat: BTreeMap<String, CompatSource>,
    pub products: ProductListing,
}

impl RegistrySnapshot {
    pub fn load(path: &Path) -> ReconcileResult<Self> {
        if !path.exists() {
            return Err(ReconcileError::PathNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let invalid = |message: String| ReconcileError::InvalidDocument {
            file: path.to_path_buf(),
            message,
        };

        let value = decode_document(path, &content).map_err(invalid)?;
        let snapshot: Self = serde_json::from_value(value).map_err(|e| invalid(e.to_string()))?;
        debug!(
            path = %path.display(),
            schemas = snapshot.listing.len(),
            data_products = snapshot.products.data_products.len(),
            "loaded registry snapshot"
        );
        Ok(snapshot)
    }
}

impl SchemaListing for RegistrySnapshot {
    fn listing(&self) -> Result<Vec<RemoteListingEntry>, PortError> {
        Ok(self.listing.clone())
    }
}

impl DeploymentHistory for RegistrySnapshot {
    fn deployments(&self, resource_hash: &str) -> Result<Vec<Deployment>, PortError> {
        if let Some(history) = self.histories.get(resource_hash) {
            return Ok(history.clone());
        }
        self.listing
            .iter()
            .find(|entry| entry.hash == resource_hash)
            .map(|entry| entry.deployments.clone())
            .ok_or_else(|| PortError::NotFound {
                operation: "fetch deployment history",
                what: format!("schema {resource_hash}"),
            })
    }
}

impl CentralRepository for RegistrySnapshot {
    fn central_listing(&self) -> Result<Vec<String>, PortError> {
        Ok(self.central.clone())
    }
}

impl DestinationLister for RegistrySnapshot {
    fn destinations(&self) -> Result<Vec<String>, PortError> {
        Ok(self.destinations.clone())
    }
}

impl MigrationOracle for RegistrySnapshot {
    fn check_migration(
        &self,
        destination: &str,
        source: &DataStructureSelf,
        _target: &Map<String, Value>,
    ) -> Result<MigrationVerdict, PortError> {
        Ok(self
            .migrations
            .get(&source.key().to_string())
            .and_then(|by_destination| by_destination.get(destination))
            .cloned()
            .unwrap_or_default())
    }
}

impl EventSpecCompatChecker for RegistrySnapshot {
    fn check_compat(
        &self,
        event: &CompatCheckable,
        entities: &[CompatCheckable],
    ) -> Result<CompatResult, PortError> {
        let sources: Vec<CompatSource> = std::iter::once(event)
            .chain(entities)
            .filter_map(|checkable| {
                self.compat.get(&checkable.source).map(|recorded| CompatSource {
                    source: checkable.source.clone(),
                    ..recorded.clone()
                })
            })
            .collect();

        let status = sources
            .iter()
            .map(|s| s.status)
            .max_by_key(|status| severity_rank(*status))
            .unwrap_or_default();

        Ok(CompatResult {
            status,
            sources,
            message: String::new(),
        })
    }
}

impl ProductRegistry for RegistrySnapshot {
    fn product_listing(&self) -> Result<ProductListing, PortError> {
        Ok(self.products.clone())
    }
}

fn severity_rank(status: CompatStatus) -> u8 {
    match status {
        CompatStatus::Compatible | CompatStatus::Unknown => 0,
        CompatStatus::Undecidable => 1,
        CompatStatus::Incompatible => 2,
    }
}
