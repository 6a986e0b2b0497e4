//! Application Layer
//!
//! Use cases that orchestrate the reconciliation flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Bounds concurrent registry calls and aborts on any port failure
//!
//! ## Use Cases
//!
//! - `PlanUseCase` - Validate, classify and advise on local data structures
//! - `ValidateUseCase` - Resolve and check data products and source applications
//! - `ProductsUseCase` - Plan data product registry writes

mod concurrency;
pub mod plan;
pub mod products;
pub mod validate;

pub use concurrency::bounded_map;
pub use plan::{PlanOptions, PlanResult, PlanUseCase};
pub use products::ProductsUseCase;
pub use validate::{ValidateOptions, ValidateResult, ValidateUseCase};
