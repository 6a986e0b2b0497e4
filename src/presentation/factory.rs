//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::application::{
    PlanOptions, PlanUseCase, ProductsUseCase, ValidateOptions, ValidateUseCase,
};
use crate::config::Config;
use crate::error::ReconcileResult;
use crate::infrastructure::{LocalDocumentSource, RegistrySnapshot};

/// Document source rooted at the project directory
pub fn create_document_source(project_root: &Path) -> LocalDocumentSource {
    LocalDocumentSource::new(project_root)
}

/// Registry state for the run
///
/// Without a snapshot the registry is empty: every local schema is new and
/// every entity that is not built in is undeployed.
pub fn load_registry(snapshot: Option<&Path>) -> ReconcileResult<RegistrySnapshot> {
    match snapshot {
        Some(path) => RegistrySnapshot::load(path),
        None => {
            warn!("no registry snapshot given, planning against an empty registry");
            Ok(RegistrySnapshot::default())
        }
    }
}

pub fn create_plan_use_case(registry: &RegistrySnapshot) -> PlanUseCase<'_> {
    PlanUseCase::new(registry, registry, registry)
}

pub fn create_validate_use_case(registry: &RegistrySnapshot) -> ValidateUseCase<'_> {
    ValidateUseCase::new(registry, registry, registry, registry)
}

pub fn create_products_use_case(registry: &RegistrySnapshot) -> ProductsUseCase<'_> {
    ProductsUseCase::new(registry)
}

pub fn plan_options(config: &Config) -> PlanOptions {
    PlanOptions {
        target_env: config.reconcile.target_env.clone(),
        concurrency: config.reconcile.effective_concurrency(),
    }
}

pub fn validate_options(config: &Config) -> ValidateOptions {
    ValidateOptions {
        concurrency: config.reconcile.effective_concurrency(),
        alternatives_display_limit: config.validation.alternatives_display_limit,
        extra_built_ins: config.validation.built_in_schemas.clone(),
    }
}

/// Paths given on the command line, else the configured defaults
pub fn roots_or(explicit: &[PathBuf], configured: &[PathBuf]) -> Vec<PathBuf> {
    if explicit.is_empty() {
        configured.to_vec()
    } else {
        explicit.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Environment;

    #[test]
    fn missing_snapshot_is_an_empty_registry() {
        let registry = load_registry(None).unwrap();
        assert_eq!(registry, RegistrySnapshot::default());
        let _plan = create_plan_use_case(&registry);
        let _validate = create_validate_use_case(&registry);
        let _products = create_products_use_case(&registry);
    }

    #[test]
    fn options_follow_config() {
        let mut config = Config::default();
        config.reconcile.target_env = Environment::Prod;
        config.reconcile.concurrency = 50;
        config.validation.built_in_schemas = vec!["iglu:a/b/jsonschema/1-0-0".to_string()];

        let plan = plan_options(&config);
        assert_eq!(plan.target_env, Environment::Prod);
        assert_eq!(plan.concurrency, 10);

        let validate = validate_options(&config);
        assert_eq!(validate.extra_built_ins.len(), 1);
    }

    #[test]
    fn explicit_roots_win() {
        let configured = vec![PathBuf::from("data-structures")];
        assert_eq!(roots_or(&[], &configured), configured);
        assert_eq!(
            roots_or(&[PathBuf::from("x")], &configured),
            vec![PathBuf::from("x")]
        );
    }
}
