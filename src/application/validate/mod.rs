//! Validate Module
//!
//! Checks data products and source applications against each other and
//! against the registry.
//!
//! ## Structure
//!
//! - `options` - `ValidateOptions`
//! - `use_case` - `ValidateUseCase` and `ValidateResult`
//!
//! ## Usage
//!
//! ```ignore
//! use registry_reconcile::application::validate::{ValidateOptions, ValidateUseCase};
//!
//! let use_case = ValidateUseCase::new(&snapshot, &snapshot, &snapshot, &snapshot);
//! let result = use_case.execute(&loaded, &ValidateOptions::default())?;
//! ```

mod options;
mod use_case;

pub use options::ValidateOptions;
pub use use_case::{ValidateResult, ValidateUseCase};
