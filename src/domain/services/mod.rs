//! Domain Services
//!
//! Pure reconciliation logic over domain entities. Nothing here performs
//! I/O or logs; collaborators arrive as port trait objects or plain data.

mod classifier;
mod deploy_checker;
mod event_spec_compat;
mod migration_advisor;
mod product_planner;
mod reference_resolver;
mod resource_rules;
mod structure_rules;

pub use classifier::{ChangeClassifier, ChangeContext, ChangeSet, ClassifyError, PromotionError};
pub use deploy_checker::{
    DeployCheckError, DeploySource, DeployStatus, SchemaDeployChecker, BUILT_IN_SCHEMAS,
};
pub use event_spec_compat::{build_compat_requests, interpret_compat, CompatRequest};
pub use migration_advisor::{MigrationAdvisor, MigrationError, MigrationReport};
pub use product_planner::{
    data_product_to_remote, event_spec_to_remote, source_app_to_remote, ProductChangeSet,
    ProductPlanner, UnresolvedReferences,
};
pub use reference_resolver::{
    EventSpecRefs, ProductRefs, ReferenceGraph, ReferenceResolver, Resolution, API_VERSION,
    DATA_PRODUCT, SOURCE_APPLICATION,
};
pub use resource_rules::{
    data_product_rules, source_app_deployments, source_app_rules, truncate_list,
    DEFAULT_ALTERNATIVES_LIMIT,
};
pub use structure_rules::validate_local_structures;
