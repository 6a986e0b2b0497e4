//! Common test utilities for registry-reconcile CLI tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated project and config directories plus a CLI runner
//! - Fixtures: Reusable document and snapshot content

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

#[allow(unused_imports)]
pub use env::*;
#[allow(unused_imports)]
pub use fixtures::*;
