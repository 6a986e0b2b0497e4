//! Plan Use Case
//!
//! Orchestrates the schema publish plan:
//! 1. Decode local data structure documents
//! 2. Validate them as a batch
//! 3. Classify against the registry listing
//! 4. Refuse patches on PROD
//! 5. Ask the migration oracle about every version update (bounded)

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info, trace};

use crate::domain::entities::{DataStructure, FileError};
use crate::domain::ports::{DestinationLister, LoadedDocuments, MigrationOracle, SchemaListing};
use crate::domain::services::{
    validate_local_structures, ChangeClassifier, ChangeContext, ChangeSet, MigrationAdvisor,
    MigrationReport,
};
use crate::domain::value_objects::{Environment, ResourcePath};
use crate::error::{ReconcileError, ReconcileResult};

use super::concurrency::bounded_map;

#[derive(Debug, Clone)]
pub struct PlanOptions {
    pub target_env: Environment,
    /// Concurrent oracle calls, clamped to 1..=10
    pub concurrency: usize,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            target_env: Environment::Dev,
            concurrency: 3,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResult {
    pub target_env: Environment,
    pub changes: ChangeSet,
    /// File → destination → report; files without reports are absent
    pub migrations: BTreeMap<ResourcePath, BTreeMap<String, MigrationReport>>,
}

impl PlanResult {
    /// Some destination needs a bigger version bump than authored
    pub fn has_migration_reports(&self) -> bool {
        !self.migrations.is_empty()
    }
}

/// Plan use case, parameterized by its registry ports
pub struct PlanUseCase<'a> {
    listing: &'a dyn SchemaListing,
    destinations: &'a dyn DestinationLister,
    oracle: &'a dyn MigrationOracle,
}

impl<'a> PlanUseCase<'a> {
    pub fn new(
        listing: &'a dyn SchemaListing,
        destinations: &'a dyn DestinationLister,
        oracle: &'a dyn MigrationOracle,
    ) -> Self {
        Self {
            listing,
            destinations,
            oracle,
        }
    }

    pub fn execute(
        &self,
        loaded: &LoadedDocuments,
        options: &PlanOptions,
    ) -> ReconcileResult<PlanResult> {
        let (locals, mut problems) = split_structures(loaded);
        info!(
            structures = locals.len(),
            env = %options.target_env,
            "planning data structures"
        );

        problems.extend(validate_local_structures(&locals));
        if !problems.is_empty() {
            return Err(ReconcileError::Batch(problems));
        }

        let remote = self.listing.listing()?;
        debug!(entries = remote.len(), "fetched registry listing");

        let changes = ChangeClassifier::classify(&locals, &remote, &options.target_env)?;
        debug!(
            create = changes.to_create.len(),
            meta = changes.to_update_meta.len(),
            new_version = changes.to_update_new_version.len(),
            patch = changes.to_update_patch.len(),
            "classified"
        );

        changes.ensure_promotable(&options.target_env)?;

        let migrations = self.advise(&changes, options.concurrency)?;
        if !migrations.is_empty() {
            info!(files = migrations.len(), "version bumps are insufficient");
        }

        Ok(PlanResult {
            target_env: options.target_env.clone(),
            changes,
            migrations,
        })
    }

    fn advise(
        &self,
        changes: &ChangeSet,
        concurrency: usize,
    ) -> ReconcileResult<BTreeMap<ResourcePath, BTreeMap<String, MigrationReport>>> {
        let pending: Vec<&ChangeContext> = changes
            .version_updates()
            .filter(|c| c.has_remote_version())
            .collect();
        if pending.is_empty() {
            return Ok(BTreeMap::new());
        }

        let destinations = self.destinations.destinations()?;
        debug!(
            destinations = destinations.len(),
            changes = pending.len(),
            "checking migrations"
        );

        let advisor = MigrationAdvisor::new(self.oracle);
        let results = bounded_map(&pending, concurrency, |change| {
            trace!(file = %change.source_file, "asking migration oracle");
            advisor
                .advise(change, &destinations)
                .map(|reports| (change.source_file.clone(), reports))
        })?;

        Ok(results
            .into_iter()
            .filter(|(_, reports)| !reports.is_empty())
            .collect())
    }
}

/// Decoded structures plus loader and decode failures, in that order
fn split_structures(
    loaded: &LoadedDocuments,
) -> (BTreeMap<ResourcePath, DataStructure>, Vec<FileError>) {
    let mut errors: Vec<FileError> = loaded.errors.clone();
    let mut locals = BTreeMap::new();

    for (file, document) in &loaded.documents {
        match serde_json::from_value::<DataStructure>(document.clone()) {
            Ok(ds) => {
                locals.insert(file.clone(), ds);
            }
            Err(e) => errors.push(FileError::new(file.clone(), e.to_string())),
        }
    }
    (locals, errors)
}
