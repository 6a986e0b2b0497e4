//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod config_warning;
mod environment;
mod hash;
mod path;
mod schema_key;
mod version;

pub use config_warning::ConfigWarning;
pub use environment::Environment;
pub use hash::{canonical_json, ContentHash};
pub use path::ResourcePath;
pub use schema_key::{IgluUri, SchemaKey, UriError};
pub use version::{ChangeKind, SchemaVersion, VersionError};
