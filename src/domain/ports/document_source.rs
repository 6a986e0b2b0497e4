//! DocumentSource port
//!
//! Supplies the local file tree as decoded, untyped documents. The domain
//! never reads files itself.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde_json::Value;

use crate::domain::entities::FileError;
use crate::domain::value_objects::ResourcePath;

/// Decoded documents plus the files that could not be decoded
#[derive(Debug, Clone, Default)]
pub struct LoadedDocuments {
    pub documents: BTreeMap<ResourcePath, Value>,
    pub errors: Vec<FileError>,
}

pub trait DocumentSource: Send + Sync {
    fn load(&self, roots: &[PathBuf]) -> Result<LoadedDocuments, super::PortError>;
}
