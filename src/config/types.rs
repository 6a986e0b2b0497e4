//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::value_objects::{ConfigWarning, Environment};
use crate::error::ReconcileResult;

use super::loader;

/// Bounds for concurrent registry calls
pub const MIN_CONCURRENCY: usize = 1;
pub const MAX_CONCURRENCY: usize = 10;

/// Where local documents live, relative to the project root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_data_structures")]
    pub data_structures: Vec<PathBuf>,

    #[serde(default = "default_data_products")]
    pub data_products: Vec<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_structures: default_data_structures(),
            data_products: default_data_products(),
        }
    }
}

fn default_data_structures() -> Vec<PathBuf> {
    vec![PathBuf::from("data-structures")]
}

fn default_data_products() -> Vec<PathBuf> {
    vec![PathBuf::from("data-products")]
}

/// Reconciliation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileConfig {
    #[serde(default, deserialize_with = "environment_from_str")]
    pub target_env: Environment,

    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            target_env: Environment::default(),
            concurrency: default_concurrency(),
        }
    }
}

impl ReconcileConfig {
    /// Configured concurrency clamped to the supported range
    pub fn effective_concurrency(&self) -> usize {
        self.concurrency.clamp(MIN_CONCURRENCY, MAX_CONCURRENCY)
    }
}

fn default_concurrency() -> usize {
    3
}

fn environment_from_str<'de, D>(deserializer: D) -> Result<Environment, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}

/// Validation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default = "default_alternatives_display_limit")]
    pub alternatives_display_limit: usize,

    /// Appended to the hard-coded built-in schema allow-list
    #[serde(default)]
    pub built_in_schemas: Vec<String>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            alternatives_display_limit: default_alternatives_display_limit(),
            built_in_schemas: Vec::new(),
        }
    }
}

fn default_alternatives_display_limit() -> usize {
    crate::domain::services::DEFAULT_ALTERNATIVES_LIMIT
}

/// Rendering format for plans and reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("unknown output format '{s}' (expected text or json)")),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// `tracing` filter directive, e.g. `info` or `registry_reconcile=debug`
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub reconcile: ReconcileConfig,

    #[serde(default)]
    pub validation: ValidationConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> ReconcileResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> ReconcileResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Explicit file, else project config, else user config, else defaults.
    /// Environment overrides are applied last.
    pub fn discover(
        explicit: Option<&Path>,
        project_root: Option<&Path>,
    ) -> ReconcileResult<(Self, Vec<ConfigWarning>)> {
        loader::discover(explicit, project_root)
    }

    /// Apply environment variable overrides (RECONCILE_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }
}
