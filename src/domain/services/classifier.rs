//! Change classification service
//!
//! Compares local schema documents with the registry listing and sorts
//! each one into the change buckets a publish run acts on. Pure: no I/O,
//! the caller hands in both snapshots.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::domain::entities::{DataStructure, DataStructureSelf, FileError, RemoteListingEntry};
use crate::domain::value_objects::{
    ContentHash, Environment, ResourcePath, SchemaKey, SchemaVersion,
};

/// One local schema scheduled for a change
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeContext {
    #[serde(skip)]
    pub resource: DataStructure,
    pub source_file: ResourcePath,
    #[serde(rename = "self")]
    pub identity: DataStructureSelf,
    /// Version deployed in the target environment. `None` for creates and
    /// first deploys to an environment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_content_hash: Option<ContentHash>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_content_hash: Option<ContentHash>,
}

impl ChangeContext {
    fn new(resource: &DataStructure, source_file: &ResourcePath, identity: &DataStructureSelf) -> Self {
        Self {
            resource: resource.clone(),
            source_file: source_file.clone(),
            identity: identity.clone(),
            remote_version: None,
            local_content_hash: None,
            remote_content_hash: None,
        }
    }

    fn with_remote_version(mut self, version: impl Into<String>) -> Self {
        self.remote_version = Some(version.into());
        self
    }

    fn with_hashes(mut self, local: ContentHash, remote: ContentHash) -> Self {
        self.local_content_hash = Some(local);
        self.remote_content_hash = Some(remote);
        self
    }

    /// Deployed before in the target environment
    pub fn has_remote_version(&self) -> bool {
        self.remote_version.as_deref().is_some_and(|v| !v.is_empty())
    }
}

/// Result of classifying a set of local schemas
///
/// A resource lands in at most one of the version buckets
/// (`to_create`, `to_update_new_version`, `to_update_patch`);
/// `to_update_meta` is independent of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSet {
    pub to_create: Vec<ChangeContext>,
    pub to_update_meta: Vec<ChangeContext>,
    pub to_update_new_version: Vec<ChangeContext>,
    pub to_update_patch: Vec<ChangeContext>,
}

/// Patches rewrite a published version in place, which PROD never allows
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("patching is not available on prod. You must increment versions on dev before deploying ({})", .files.join(", "))]
pub struct PromotionError {
    pub files: Vec<String>,
}

/// Local schemas that could not be classified
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("{} file(s) could not be classified", .0.len())]
pub struct ClassifyError(pub Vec<FileError>);

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.to_create.is_empty()
            && self.to_update_meta.is_empty()
            && self.to_update_new_version.is_empty()
            && self.to_update_patch.is_empty()
    }

    /// Number of distinct entries across all buckets
    pub fn total(&self) -> usize {
        self.to_create.len()
            + self.to_update_meta.len()
            + self.to_update_new_version.len()
            + self.to_update_patch.len()
    }

    /// Resources whose payload changed against a deployed version
    pub fn version_updates(&self) -> impl Iterator<Item = &ChangeContext> {
        self.to_update_new_version
            .iter()
            .chain(self.to_update_patch.iter())
    }

    /// Fails when the plan would patch a PROD deployment
    pub fn ensure_promotable(&self, env: &Environment) -> Result<(), PromotionError> {
        if *env == Environment::Prod && !self.to_update_patch.is_empty() {
            return Err(PromotionError {
                files: self
                    .to_update_patch
                    .iter()
                    .map(|c| c.source_file.to_string())
                    .collect(),
            });
        }
        Ok(())
    }
}

/// Pure classification service
pub struct ChangeClassifier;

impl ChangeClassifier {
    /// Classify every local schema against the listing for `env`.
    ///
    /// Files whose `data` block does not decode are collected and reported
    /// together; nothing is classified when any file fails.
    pub fn classify(
        locals: &BTreeMap<ResourcePath, DataStructure>,
        remote: &[RemoteListingEntry],
        env: &Environment,
    ) -> Result<ChangeSet, ClassifyError> {
        let remotes: HashMap<SchemaKey, &RemoteListingEntry> =
            remote.iter().map(|entry| (entry.key(), entry)).collect();

        let mut changes = ChangeSet::new();
        let mut errors = Vec::new();

        for (file, resource) in locals {
            let identity = match resource.parse_data() {
                Ok(data) => data.self_,
                Err(e) => {
                    errors.push(FileError::new(file.clone(), format!("invalid data block: {e}")));
                    continue;
                }
            };

            let Some(remote) = remotes.get(&identity.key()) else {
                changes
                    .to_create
                    .push(ChangeContext::new(resource, file, &identity));
                continue;
            };

            if resource.meta != remote.meta {
                changes
                    .to_update_meta
                    .push(ChangeContext::new(resource, file, &identity));
            }

            let local_hash = resource.content_hash();
            match remote.deployment_for(env) {
                None => changes.to_update_new_version.push(
                    ChangeContext::new(resource, file, &identity).with_remote_version(""),
                ),
                Some(deployment) if local_hash.matches_str(&deployment.content_hash) => {}
                Some(deployment) if !same_version(&identity.version, &deployment.version) => {
                    changes.to_update_new_version.push(
                        ChangeContext::new(resource, file, &identity)
                            .with_remote_version(&deployment.version),
                    );
                }
                Some(deployment) => changes.to_update_patch.push(
                    ChangeContext::new(resource, file, &identity)
                        .with_remote_version(&deployment.version)
                        .with_hashes(local_hash, ContentHash::new(&deployment.content_hash)),
                ),
            }
        }

        if errors.is_empty() {
            Ok(changes)
        } else {
            Err(ClassifyError(errors))
        }
    }
}

/// Numeric comparison, so `1-0-01` and `1-0-1` are the same version.
/// Unparseable versions compare as text.
fn same_version(local: &str, remote: &str) -> bool {
    match (SchemaVersion::parse(local), SchemaVersion::parse(remote)) {
        (Ok(a), Ok(b)) => a == b,
        _ => local == remote,
    }
}
