//! Schema identity and `iglu:` URIs
//!
//! A schema is addressed by `(vendor, name, format)` across local files and
//! the remote listing. A URI pins one version of it:
//! `iglu:com.acme/checkout/jsonschema/1-0-0`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error when an `iglu:` URI cannot be split into its four parts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UriError {
    #[error("invalid schema URI '{uri}': expected iglu:vendor/name/format/version")]
    Shape { uri: String },
}

/// Version-independent schema identity
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SchemaKey {
    pub vendor: String,
    pub name: String,
    pub format: String,
}

impl SchemaKey {
    pub fn new(
        vendor: impl Into<String>,
        name: impl Into<String>,
        format: impl Into<String>,
    ) -> Self {
        Self {
            vendor: vendor.into(),
            name: name.into(),
            format: format.into(),
        }
    }

    /// `vendor/name` pair, which must be unique across local files
    pub fn vendor_name(&self) -> String {
        format!("{}/{}", self.vendor, self.name)
    }
}

impl fmt::Display for SchemaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.vendor, self.name, self.format)
    }
}

/// A parsed `iglu:vendor/name/format/version` reference
///
/// The version is kept as text; the deploy checker compares it verbatim
/// against the registry's version strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IgluUri {
    pub key: SchemaKey,
    pub version: String,
}

impl IgluUri {
    pub const SCHEME: &'static str = "iglu:";

    pub fn parse(uri: &str) -> Result<Self, UriError> {
        let shape = || UriError::Shape {
            uri: uri.to_string(),
        };

        let rest = uri.strip_prefix(Self::SCHEME).unwrap_or(uri);
        let parts: Vec<&str> = rest.split('/').collect();
        let [vendor, name, format, version] = parts.as_slice() else {
            return Err(shape());
        };

        Ok(Self {
            key: SchemaKey::new(*vendor, *name, *format),
            version: (*version).to_string(),
        })
    }

    /// Strict form check for authored entity sources.
    ///
    /// Segments are limited to `[a-zA-Z0-9-_.]` (vendor) or `[a-zA-Z0-9-_]`
    /// (name, format) and the version to `digits-digits-digits`.
    pub fn is_well_formed(uri: &str) -> bool {
        let Some(rest) = uri.strip_prefix(Self::SCHEME) else {
            return false;
        };
        let parts: Vec<&str> = rest.split('/').collect();
        let [vendor, name, format, version] = parts.as_slice() else {
            return false;
        };

        let segment = |s: &str, allow_dot: bool| {
            !s.is_empty()
                && s.chars().all(|c| {
                    c.is_ascii_alphanumeric() || c == '-' || c == '_' || (allow_dot && c == '.')
                })
        };
        let numeric = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        let version_parts: Vec<&str> = version.split('-').collect();

        segment(*vendor, true)
            && segment(*name, false)
            && segment(*format, false)
            && version_parts.len() == 3
            && version_parts.iter().all(|p| numeric(*p))
    }
}

impl fmt::Display for IgluUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}/{}", Self::SCHEME, self.key, self.version)
    }
}

impl FromStr for IgluUri {
    type Err = UriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
