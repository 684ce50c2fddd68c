//! Deployment environment flag.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Environment the service runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Deployment {
    /// Local or CI environment without toggle storage.
    Development,
    /// Pre-production environment.
    Staging,
    /// Production environment.
    #[default]
    Production,
}

impl Deployment {
    /// Whether this is a development deployment.
    pub const fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }

    /// Stable configuration name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for Deployment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised for an unrecognised deployment name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown deployment {0:?}; expected development, staging or production")]
pub struct ParseDeploymentError(pub String);

impl FromStr for Deployment {
    type Err = ParseDeploymentError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" => Ok(Self::Development),
            "staging" => Ok(Self::Staging),
            "production" => Ok(Self::Production),
            _ => Err(ParseDeploymentError(value.to_owned())),
        }
    }
}
