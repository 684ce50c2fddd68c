//! Feature identifiers, persisted toggles, and the feature permission table.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::rbac::Permission;

/// Maximum accepted length for a feature identifier.
pub const FEATURE_ID_MAX: usize = 64;

/// Feature identifier validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeatureIdValidationError {
    /// Identifier was empty.
    #[error("feature id must not be empty")]
    Empty,
    /// Identifier contained characters outside `[a-z0-9-]`.
    #[error("feature id may only contain lowercase letters, digits and '-'")]
    InvalidCharacter,
    /// Identifier exceeded [`FEATURE_ID_MAX`].
    #[error("feature id must be at most {max} characters")]
    TooLong {
        /// Upper bound that was exceeded.
        max: usize,
    },
}

/// Kebab-case feature identifier such as `change-log`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FeatureId(String);

impl FeatureId {
    /// Validate and construct a feature identifier.
    pub fn new(value: impl Into<String>) -> Result<Self, FeatureIdValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(FeatureIdValidationError::Empty);
        }
        if value.len() > FEATURE_ID_MAX {
            return Err(FeatureIdValidationError::TooLong {
                max: FEATURE_ID_MAX,
            });
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(FeatureIdValidationError::InvalidCharacter);
        }
        Ok(Self(value))
    }

    /// Borrow the identifier.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<FeatureId> for String {
    fn from(value: FeatureId) -> Self {
        value.0
    }
}

impl TryFrom<String> for FeatureId {
    type Error = FeatureIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// How an enabled toggle is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleType {
    /// Enabled means on for everyone.
    Manual,
    /// Enabled means on for users holding the feature's permission.
    Permission,
}

impl ToggleType {
    /// Stable storage name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Permission => "permission",
        }
    }
}

/// Raised when a toggle type name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown toggle type: {0}")]
pub struct ParseToggleTypeError(pub String);

impl FromStr for ToggleType {
    type Err = ParseToggleTypeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "manual" => Ok(Self::Manual),
            "permission" => Ok(Self::Permission),
            other => Err(ParseToggleTypeError(other.to_owned())),
        }
    }
}

impl fmt::Display for ToggleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted on/off switch for one feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureToggle {
    /// Feature this toggle controls.
    pub id: FeatureId,
    /// Operator-controlled switch.
    pub is_enabled: bool,
    /// Whether the permission table further restricts an enabled toggle.
    pub toggle_type: ToggleType,
}

/// Static mapping from feature to the permission that unlocks it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeaturePermissionTable {
    entries: HashMap<FeatureId, Permission>,
}

impl FeaturePermissionTable {
    /// Features shipped with the service.
    pub fn standard() -> Self {
        let mut entries = HashMap::new();
        entries.insert(FeatureId(String::from("change-log")), Permission::ViewChange);
        entries.insert(
            FeatureId(String::from("admin-panel")),
            Permission::ViewAdminPanel,
        );
        Self { entries }
    }

    /// Build a table from explicit entries.
    pub fn from_entries(entries: impl IntoIterator<Item = (FeatureId, Permission)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Permission required by `feature`, if any.
    pub fn permission_for(&self, feature: &FeatureId) -> Option<Permission> {
        self.entries.get(feature).copied()
    }
}
