//! Schema Version Value Object
//!
//! Versions follow the `MODEL-REVISION-ADDITION` scheme (`"1-0-2"`).
//! Ordering is numeric per segment, model first.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error when a version string cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    /// Segment missing, extra, or not an unsigned integer
    #[error("malformed version '{input}': expected MODEL-REVISION-ADDITION")]
    Malformed { input: String },
}

/// A parsed `MODEL-REVISION-ADDITION` version
///
/// Field order matters: the derived `Ord` compares model, then revision,
/// then addition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SchemaVersion {
    pub model: u32,
    pub revision: u32,
    pub addition: u32,
}

impl SchemaVersion {
    pub const fn new(model: u32, revision: u32, addition: u32) -> Self {
        Self {
            model,
            revision,
            addition,
        }
    }

    /// Parse `"M-R-A"`. Exactly three numeric segments are accepted.
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let malformed = || VersionError::Malformed {
            input: input.to_string(),
        };

        let mut parts = input.split('-');
        let mut next = || -> Result<u32, VersionError> {
            let segment = parts.next().ok_or_else(malformed)?;
            if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed());
            }
            segment.parse().map_err(|_| malformed())
        };

        let model = next()?;
        let revision = next()?;
        let addition = next()?;

        if parts.next().is_some() {
            return Err(malformed());
        }

        Ok(Self::new(model, revision, addition))
    }

    /// Smallest version that accommodates a change of `kind` on top of `self`.
    ///
    /// `NoChange` and unrecognized kinds leave the version untouched.
    pub fn bump(self, kind: &ChangeKind) -> Self {
        match kind {
            ChangeKind::Major => Self::new(self.model.saturating_add(1), 0, 0),
            ChangeKind::Revision => Self::new(self.model, self.revision.saturating_add(1), 0),
            ChangeKind::Minor => Self::new(self.model, self.revision, self.addition.saturating_add(1)),
            ChangeKind::NoChange | ChangeKind::Unrecognized(_) => self,
        }
    }

    /// `-1`, `0` or `1`, for callers that want the integer form.
    pub fn compare(&self, other: &Self) -> i8 {
        match self.cmp(other) {
            std::cmp::Ordering::Less => -1,
            std::cmp::Ordering::Equal => 0,
            std::cmp::Ordering::Greater => 1,
        }
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.model, self.revision, self.addition)
    }
}

impl FromStr for SchemaVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for SchemaVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SchemaVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Change classification returned by a compatibility oracle
///
/// The names follow the version scheme: `major` bumps the model,
/// `revision` the revision, `minor` the addition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ChangeKind {
    #[default]
    NoChange,
    Minor,
    Revision,
    Major,
    /// Anything else the oracle sends. Treated as no bump.
    Unrecognized(String),
}

impl ChangeKind {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "no-change" => Self::NoChange,
            "minor" => Self::Minor,
            "revision" => Self::Revision,
            "major" => Self::Major,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::NoChange => "no-change",
            Self::Minor => "minor",
            Self::Revision => "revision",
            Self::Major => "major",
            Self::Unrecognized(raw) => raw,
        }
    }

    pub fn is_no_change(&self) -> bool {
        matches!(self, Self::NoChange)
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ChangeKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ChangeKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}
