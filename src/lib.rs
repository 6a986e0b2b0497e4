//! registry-reconcile - plan and validate registry changes from local files
//!
//! Reconciles locally authored data structures, data products and source
//! applications against a remote schema registry. Computes the publish
//! plan for schemas, validates references, deployments and event spec
//! compatibility, and plans data product writes.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{PlanOptions, PlanResult, PlanUseCase, ValidateOptions, ValidateResult};
pub use config::Config;
pub use domain::value_objects::{canonical_json, ContentHash, Environment, SchemaVersion};
pub use error::{ReconcileError, ReconcileResult};
pub use infrastructure::{LocalDocumentSource, RegistrySnapshot};
