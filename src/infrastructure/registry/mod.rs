//! Registry adapters

mod snapshot;

pub use snapshot::RegistrySnapshot;
