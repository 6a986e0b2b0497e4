//! Configuration module for registry-reconcile
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (RECONCILE_*)
//! 3. Project config (.reconcile/config.toml)
//! 4. User config (<config dir>/registry-reconcile/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use loader::{PROJECT_CONFIG, USER_CONFIG};
pub use types::{
    Config, OutputConfig, OutputFormat, PathsConfig, ReconcileConfig, ValidationConfig,
    MAX_CONCURRENCY, MIN_CONCURRENCY,
};
