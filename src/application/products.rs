//! Products Use Case
//!
//! Resolves local data products and source applications, then plans the
//! registry writes that would bring the remote product listing in line.
//! Broken references stop the plan; they are reported per file.

use tracing::{debug, info};

use crate::domain::entities::FileError;
use crate::domain::ports::{LoadedDocuments, ProductRegistry};
use crate::domain::services::{ProductChangeSet, ProductPlanner, ReferenceResolver};
use crate::error::{ReconcileError, ReconcileResult};

pub struct ProductsUseCase<'a> {
    registry: &'a dyn ProductRegistry,
}

impl<'a> ProductsUseCase<'a> {
    pub fn new(registry: &'a dyn ProductRegistry) -> Self {
        Self { registry }
    }

    pub fn execute(&self, loaded: &LoadedDocuments) -> ReconcileResult<ProductChangeSet> {
        let resolution = ReferenceResolver::resolve(&loaded.documents);

        let mut errors = loaded.errors.clone();
        for (file, diagnostics) in resolution.diagnostics.iter() {
            errors.extend(
                diagnostics
                    .iter()
                    .filter(|d| d.is_error())
                    .map(|d| FileError::new(file.clone(), d.message.clone())),
            );
        }
        if !errors.is_empty() {
            return Err(ReconcileError::Batch(errors));
        }

        let remote = self.registry.product_listing()?;
        debug!(
            data_products = remote.data_products.len(),
            event_specs = remote.event_specs.len(),
            source_apps = remote.source_applications.len(),
            "fetched product listing"
        );

        let changes = ProductPlanner::plan(&resolution, &remote)?;
        info!(changes = changes.total(), "planned data product changes");
        Ok(changes)
    }
}
