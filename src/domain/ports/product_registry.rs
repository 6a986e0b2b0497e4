//! Data product registry ports

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::entities::ProductListing;

use super::PortError;

/// Remote data products, event specs and source applications
pub trait ProductRegistry: Send + Sync {
    fn product_listing(&self) -> Result<ProductListing, PortError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompatStatus {
    #[default]
    Compatible,
    Undecidable,
    Incompatible,
    /// Statuses this tool does not act on
    #[serde(other)]
    Unknown,
}

/// Inline schema checked against the schema its `source` points to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatCheckable {
    pub source: String,
    pub schema: Map<String, Value>,
}

/// Per-source outcome, with per-property statuses
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompatSource {
    pub source: String,
    pub status: CompatStatus,
    pub properties: BTreeMap<String, CompatStatus>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompatResult {
    pub status: CompatStatus,
    pub sources: Vec<CompatSource>,
    pub message: String,
}

/// Checks an event spec's inline event and entity schemas
pub trait EventSpecCompatChecker: Send + Sync {
    fn check_compat(
        &self,
        event: &CompatCheckable,
        entities: &[CompatCheckable],
    ) -> Result<CompatResult, PortError>;
}
