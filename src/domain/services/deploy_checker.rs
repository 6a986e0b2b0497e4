//! Schema deploy checker
//!
//! Answers "is `iglu:vendor/name/format/version` deployed anywhere this
//! organisation can resolve it?" by consulting, in order:
//!
//! 1. built-in schemas that every pipeline ships with
//! 2. the public central repository listing
//! 3. the organisation's listing (DEV or PROD deployment of that version)
//! 4. the full deployment history of the matching resource, fetched lazily
//!    and at most once per resource
//!
//! The first tier that matches wins.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::{Arc, Mutex, OnceLock};

use crate::domain::entities::{Deployment, RemoteListingEntry};
use crate::domain::ports::{DeploymentHistory, PortError};
use crate::domain::value_objects::{IgluUri, UriError};

/// Schemas resolvable without consulting any registry
pub const BUILT_IN_SCHEMAS: &[&str] = &[
    "iglu:com.snowplowanalytics.snowplow/page_ping/jsonschema/1-0-0",
    "iglu:com.snowplowanalytics.snowplow/page_view/jsonschema/1-0-0",
];

/// Where a deployed schema was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeploySource {
    BuiltIn,
    Central,
    Listing,
    History,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployStatus {
    Found(DeploySource),
    /// Not deployed. `alternatives` holds the other known versions of the
    /// same schema, sorted; empty when the schema is unknown.
    Missing { alternatives: BTreeSet<String> },
}

impl DeployStatus {
    pub fn is_found(&self) -> bool {
        matches!(self, DeployStatus::Found(_))
    }

    pub fn alternatives(&self) -> Vec<String> {
        match self {
            DeployStatus::Found(_) => Vec::new(),
            DeployStatus::Missing { alternatives } => alternatives.iter().cloned().collect(),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DeployCheckError {
    #[error(transparent)]
    Uri(#[from] UriError),

    #[error("fetching deployments for {uri}: {source}")]
    History { uri: String, source: PortError },
}

pub struct SchemaDeployChecker<'a> {
    built_ins: HashSet<String>,
    central: HashSet<String>,
    listing: &'a [RemoteListingEntry],
    history: &'a dyn DeploymentHistory,
    fetched: Mutex<HashMap<String, Arc<HistoryCell>>>,
}

/// One resource's history, filled by whichever check asks first
type HistoryCell = OnceLock<Result<Vec<Deployment>, PortError>>;

impl<'a> SchemaDeployChecker<'a> {
    pub fn new(listing: &'a [RemoteListingEntry], history: &'a dyn DeploymentHistory) -> Self {
        Self {
            built_ins: BUILT_IN_SCHEMAS.iter().map(|s| s.to_string()).collect(),
            central: HashSet::new(),
            listing,
            history,
            fetched: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_central_listing(mut self, uris: impl IntoIterator<Item = String>) -> Self {
        self.central = uris.into_iter().collect();
        self
    }

    /// Extra URIs treated like the built-in list
    pub fn with_built_ins(mut self, uris: impl IntoIterator<Item = String>) -> Self {
        self.built_ins.extend(uris);
        self
    }

    pub fn check(&self, uri: &str) -> Result<DeployStatus, DeployCheckError> {
        let parsed = IgluUri::parse(uri)?;

        if self.built_ins.contains(uri) {
            return Ok(DeployStatus::Found(DeploySource::BuiltIn));
        }
        if self.central.contains(uri) {
            return Ok(DeployStatus::Found(DeploySource::Central));
        }

        let Some(entry) = self.listing.iter().find(|e| e.key() == parsed.key) else {
            return Ok(DeployStatus::Missing {
                alternatives: BTreeSet::new(),
            });
        };

        if has_resolvable(&entry.deployments, &parsed.version) {
            return Ok(DeployStatus::Found(DeploySource::Listing));
        }

        let history = self
            .history_for(&entry.hash)
            .map_err(|source| DeployCheckError::History {
                uri: uri.to_string(),
                source,
            })?;

        if has_resolvable(&history, &parsed.version) {
            return Ok(DeployStatus::Found(DeploySource::History));
        }

        let alternatives = entry
            .deployments
            .iter()
            .chain(history.iter())
            .map(|d| &d.version)
            .filter(|v| **v != parsed.version)
            .cloned()
            .collect();

        Ok(DeployStatus::Missing { alternatives })
    }

    /// Number of resources whose history has been fetched
    pub fn fetched_count(&self) -> usize {
        self.fetched
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .values()
            .filter(|cell| cell.get().is_some())
            .count()
    }

    fn history_for(&self, resource_hash: &str) -> Result<Vec<Deployment>, PortError> {
        // The map lock only guards cell lookup; fetches run outside it
        let cell = {
            let mut cells = self
                .fetched
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            Arc::clone(cells.entry(resource_hash.to_string()).or_default())
        };

        cell.get_or_init(|| self.history.deployments(resource_hash))
            .clone()
    }
}

fn has_resolvable(deployments: &[Deployment], version: &str) -> bool {
    deployments
        .iter()
        .any(|d| d.version == version && d.env.is_resolvable())
}
