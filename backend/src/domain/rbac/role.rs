//! Role tags assigned to users.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role granted to a user.
///
/// Roles are immutable tags. Persistence stores them by their snake_case
/// name, see [`Role::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Default role; grants nothing on its own.
    Basic,
    /// May read the change log.
    ChangeLogViewer,
    /// May read and edit the change log.
    ChangeLogEditor,
    /// May open the admin panel.
    Admin,
}

impl Role {
    /// Every known role, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Basic,
        Self::ChangeLogViewer,
        Self::ChangeLogEditor,
        Self::Admin,
    ];

    /// Stable storage name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::ChangeLogViewer => "change_log_viewer",
            Self::ChangeLogEditor => "change_log_editor",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored or typed role name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == value)
            .ok_or_else(|| ParseRoleError(value.to_owned()))
    }
}
