//! Validate Use Case
//!
//! 1. Resolve references between data products and source applications
//! 2. Run per-document rules
//! 3. Check source application entities are deployed (bounded)
//! 4. Run event spec compatibility checks (bounded)
//!
//! Diagnostics accumulate per file. Any registry failure aborts.

use tracing::{debug, info, trace};

use crate::domain::entities::{Diagnostic, DiagnosticReport, SourceApp};
use crate::domain::ports::{
    CentralRepository, DeploymentHistory, EventSpecCompatChecker, LoadedDocuments, SchemaListing,
};
use crate::domain::services::{
    build_compat_requests, data_product_rules, interpret_compat, source_app_deployments,
    source_app_rules, CompatRequest, ReferenceResolver, SchemaDeployChecker,
};
use crate::domain::value_objects::ResourcePath;
use crate::error::ReconcileResult;

use super::super::concurrency::bounded_map;
use super::options::ValidateOptions;

/// Result of a validate run
#[derive(Debug, Clone, Default)]
pub struct ValidateResult {
    pub diagnostics: DiagnosticReport,
    pub data_products: usize,
    pub source_apps: usize,
}

impl ValidateResult {
    pub fn is_success(&self) -> bool {
        !self.diagnostics.has_errors()
    }
}

pub struct ValidateUseCase<'a> {
    listing: &'a dyn SchemaListing,
    history: &'a dyn DeploymentHistory,
    central: &'a dyn CentralRepository,
    compat: &'a dyn EventSpecCompatChecker,
}

impl<'a> ValidateUseCase<'a> {
    pub fn new(
        listing: &'a dyn SchemaListing,
        history: &'a dyn DeploymentHistory,
        central: &'a dyn CentralRepository,
        compat: &'a dyn EventSpecCompatChecker,
    ) -> Self {
        Self {
            listing,
            history,
            central,
            compat,
        }
    }

    pub fn execute(
        &self,
        loaded: &LoadedDocuments,
        options: &ValidateOptions,
    ) -> ReconcileResult<ValidateResult> {
        let mut report = DiagnosticReport::new();
        for error in &loaded.errors {
            report.push(&error.file, Diagnostic::error(error.message.clone()));
        }

        let resolution = ReferenceResolver::resolve(&loaded.documents);
        info!(
            data_products = resolution.data_products.len(),
            source_apps = resolution.source_apps.len(),
            "validating"
        );
        report.merge(resolution.diagnostics.clone());

        for (file, dp) in &resolution.data_products {
            report.extend(file, data_product_rules(dp));
        }
        for (file, sa) in &resolution.source_apps {
            report.extend(file, source_app_rules(sa));
        }

        let apps: Vec<(&ResourcePath, &SourceApp)> = resolution
            .source_apps
            .iter()
            .filter(|(_, sa)| sa.data.entities.as_ref().is_some_and(|e| e.iter_tagged().next().is_some()))
            .collect();
        if !apps.is_empty() {
            self.check_deployments(&apps, options, &mut report)?;
        }

        let mut requests: Vec<(&ResourcePath, CompatRequest)> = Vec::new();
        for (file, dp) in &resolution.data_products {
            let (built, warnings) = build_compat_requests(dp);
            report.extend(file, warnings);
            requests.extend(built.into_iter().map(|r| (file, r)));
        }
        if !requests.is_empty() {
            debug!(requests = requests.len(), "checking event spec compatibility");
            let interpreted = bounded_map(&requests, options.concurrency, |(file, request)| {
                trace!(file = %file, spec = request.spec_index, "asking compatibility oracle");
                self.compat
                    .check_compat(&request.event, &request.entities)
                    .map(|result| (*file, interpret_compat(request, &result)))
            })?;
            for (file, diagnostics) in interpreted {
                report.extend(file, diagnostics);
            }
        }

        Ok(ValidateResult {
            diagnostics: report,
            data_products: resolution.data_products.len(),
            source_apps: resolution.source_apps.len(),
        })
    }

    fn check_deployments(
        &self,
        apps: &[(&ResourcePath, &SourceApp)],
        options: &ValidateOptions,
        report: &mut DiagnosticReport,
    ) -> ReconcileResult<()> {
        let listing = self.listing.listing()?;
        let central = self.central.central_listing()?;
        debug!(
            listing = listing.len(),
            central = central.len(),
            "fetched schema listings"
        );

        let checker = SchemaDeployChecker::new(&listing, self.history)
            .with_central_listing(central)
            .with_built_ins(options.extra_built_ins.iter().cloned());

        let checked = bounded_map(apps, options.concurrency, |(file, sa)| {
            source_app_deployments(sa, &checker, options.alternatives_display_limit)
                .map(|diagnostics| (*file, diagnostics))
        })?;
        debug!(histories = checker.fetched_count(), "deployment checks done");

        for (file, diagnostics) in checked {
            report.extend(file, diagnostics);
        }
        Ok(())
    }
}
