//! Presentation Layer
//!
//! This layer handles:
//! - Creating use cases with infrastructure dependencies
//! - Output formatting (text/JSON)
//!
//! ## Structure
//!
//! - `factory` - Creates use cases with proper dependencies (dependency injection)
//! - `output` - Output rendering abstractions
//!
//! ## Usage
//!
//! ```ignore
//! use registry_reconcile::presentation::factory;
//!
//! let registry = factory::load_registry(Some(Path::new("registry.yml")))?;
//! let result = factory::create_plan_use_case(&registry).execute(&loaded, &options)?;
//! ```

pub mod factory;
pub mod output;

pub use output::{create_renderer, JsonRenderer, Renderer, TextRenderer};
