//! Deployment environment value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Registry environment a schema version is deployed to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Environment {
    #[default]
    #[serde(rename = "DEV")]
    Dev,
    #[serde(rename = "PROD")]
    Prod,
    /// Environments the registry reports that this tool does not target
    #[serde(untagged)]
    Other(String),
}

impl Environment {
    pub fn as_str(&self) -> &str {
        match self {
            Environment::Dev => "DEV",
            Environment::Prod => "PROD",
            Environment::Other(name) => name,
        }
    }

    /// DEV and PROD are the environments deployments are resolved against
    pub fn is_resolvable(&self) -> bool {
        matches!(self, Environment::Dev | Environment::Prod)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    /// Case-insensitive parse used for CLI and config input
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DEV" => Ok(Environment::Dev),
            "PROD" => Ok(Environment::Prod),
            _ => Err(format!("unknown environment '{s}' (expected dev or prod)")),
        }
    }
}
