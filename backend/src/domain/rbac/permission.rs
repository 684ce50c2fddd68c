//! Permission tags checked by the authorizer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Action a role may grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Create a change log entry.
    CreateChange,
    /// Edit an existing change log entry.
    UpdateChange,
    /// Remove a change log entry.
    DeleteChange,
    /// Read the change log.
    ViewChange,
    /// Open the admin panel.
    ViewAdminPanel,
}

impl Permission {
    /// Every known permission, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::CreateChange,
        Self::UpdateChange,
        Self::DeleteChange,
        Self::ViewChange,
        Self::ViewAdminPanel,
    ];

    /// Stable textual name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateChange => "create_change",
            Self::UpdateChange => "update_change",
            Self::DeleteChange => "delete_change",
            Self::ViewChange => "view_change",
            Self::ViewAdminPanel => "view_admin_panel",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a permission name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown permission: {0}")]
pub struct ParsePermissionError(pub String);

impl FromStr for Permission {
    type Err = ParsePermissionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|permission| permission.as_str() == value)
            .ok_or_else(|| ParsePermissionError(value.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn every_permission_parses_from_its_name() {
        for permission in Permission::ALL {
            assert_eq!(permission.as_str().parse::<Permission>(), Ok(permission));
        }
    }

    #[rstest]
    fn unknown_permission_is_rejected() {
        assert!("approve_change".parse::<Permission>().is_err());
    }
}
