//! Schema registry ports
//!
//! Everything the reconciliation needs to know about remote schemas:
//! the listing, per-resource deployment history, the public central
//! repository, migration destinations and the migration oracle.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::entities::{DataStructureSelf, Deployment, RemoteListingEntry};
use crate::domain::value_objects::ChangeKind;

use super::PortError;

/// Listing of the organisation's schemas, fetched once per run
pub trait SchemaListing: Send + Sync {
    fn listing(&self) -> Result<Vec<RemoteListingEntry>, PortError>;
}

/// Full deployment history of one schema, by its registry hash
pub trait DeploymentHistory: Send + Sync {
    fn deployments(&self, resource_hash: &str) -> Result<Vec<Deployment>, PortError>;
}

/// URIs published in the public central repository
pub trait CentralRepository: Send + Sync {
    fn central_listing(&self) -> Result<Vec<String>, PortError>;
}

/// Known loader destination types (warehouses, lakes...)
pub trait DestinationLister: Send + Sync {
    fn destinations(&self) -> Result<Vec<String>, PortError>;
}

/// One detected difference between two schema versions
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Migration {
    pub migration_type: String,
    pub change_type: ChangeKind,
    pub path: String,
    pub message: String,
}

/// Oracle answer for one destination
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MigrationVerdict {
    pub change_type: ChangeKind,
    pub migrations: Vec<Migration>,
}

/// Classifies the change from a deployed schema version to a new body
pub trait MigrationOracle: Send + Sync {
    /// `source` carries the remote version being migrated from
    fn check_migration(
        &self,
        destination: &str,
        source: &DataStructureSelf,
        target: &Map<String, Value>,
    ) -> Result<MigrationVerdict, PortError>;
}
