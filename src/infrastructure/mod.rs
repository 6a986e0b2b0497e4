//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Local file tree loader (YAML and JSON documents)
//! - `registry/` - Registry adapters (offline snapshot)

pub mod fs;
pub mod registry;

// Re-export for convenience
pub use fs::{decode_document, LocalDocumentSource};
pub use registry::RegistrySnapshot;
