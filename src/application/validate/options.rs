//! Validate Options

use crate::domain::services::DEFAULT_ALTERNATIVES_LIMIT;

/// Options for the validate use case
#[derive(Debug, Clone)]
pub struct ValidateOptions {
    /// Concurrent registry calls, clamped to 1..=10
    pub concurrency: usize,
    /// How many alternative versions a "could not find deployment"
    /// message lists before collapsing the rest
    pub alternatives_display_limit: usize,
    /// Treated as deployed without asking the registry
    pub extra_built_ins: Vec<String>,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            concurrency: 3,
            alternatives_display_limit: DEFAULT_ALTERNATIVES_LIMIT,
            extra_built_ins: Vec::new(),
        }
    }
}
