//! Domain Layer
//!
//! The reconciliation core: pure logic with no file, network or logging
//! dependencies.
//!
//! ## Structure
//!
//! - `value_objects/` - Versions, content hashes, schema keys, paths
//! - `entities/` - Local documents, remote records, diagnostics
//! - `ports/` - Traits for the registry and the local document source
//! - `services/` - Classifier, resolver, deploy checker, migration advisor
//!   and the rule sets built on them
//!
//! ## Design Principles
//!
//! 1. **No I/O** - Every collaborator arrives through a port or as data
//! 2. **Deterministic** - Sorted containers wherever output is rendered
//! 3. **Collect, don't abort** - Per-file problems accumulate; only port
//!    failures end a run

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
