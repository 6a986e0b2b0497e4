//! Migration advisor
//!
//! For a schema about to replace a deployed version, asks the migration
//! oracle how each destination sees the change and reports destinations
//! where the authored version is not bumped far enough.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::entities::DataStructureSelf;
use crate::domain::ports::{MigrationOracle, PortError};
use crate::domain::value_objects::{SchemaVersion, VersionError};

use super::ChangeContext;

/// A destination for which the authored version is insufficient
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationReport {
    pub destination_type: String,
    pub suggested_version: SchemaVersion,
    pub messages: Vec<String>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MigrationError {
    #[error("{file}: {source}")]
    Version {
        file: String,
        source: VersionError,
    },

    #[error("{file}: {source}")]
    Oracle { file: String, source: PortError },
}

/// Stateless advisor over a migration oracle
pub struct MigrationAdvisor<'a> {
    oracle: &'a dyn MigrationOracle,
}

impl<'a> MigrationAdvisor<'a> {
    pub fn new(oracle: &'a dyn MigrationOracle) -> Self {
        Self { oracle }
    }

    /// Check one change against every destination.
    ///
    /// Contexts without a remote version (first deploy to the environment)
    /// have no baseline and yield no reports. The result is keyed by
    /// destination type.
    pub fn advise(
        &self,
        change: &ChangeContext,
        destinations: &[String],
    ) -> Result<BTreeMap<String, MigrationReport>, MigrationError> {
        let mut reports = BTreeMap::new();

        let Some(remote_version) = change.remote_version.as_deref().filter(|v| !v.is_empty())
        else {
            return Ok(reports);
        };

        let file = change.source_file.to_string();
        let version_error = |source| MigrationError::Version {
            file: file.clone(),
            source,
        };
        let remote = SchemaVersion::parse(remote_version).map_err(version_error)?;
        let local = change.identity.parsed_version().map_err(version_error)?;

        let source = DataStructureSelf {
            version: remote_version.to_string(),
            ..change.identity.clone()
        };

        for destination in destinations {
            let verdict = self
                .oracle
                .check_migration(destination, &source, &change.resource.data)
                .map_err(|source| MigrationError::Oracle {
                    file: file.clone(),
                    source,
                })?;

            if verdict.change_type.is_no_change() {
                continue;
            }

            let required = remote.bump(&verdict.change_type);
            if required > local {
                reports.insert(
                    destination.clone(),
                    MigrationReport {
                        destination_type: destination.clone(),
                        suggested_version: required,
                        messages: verdict.migrations.into_iter().map(|m| m.message).collect(),
                    },
                );
            }
        }

        Ok(reports)
    }
}
