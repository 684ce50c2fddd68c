//! Static role to permission mapping.
//!
//! The table is built once at start-up and shared read-only, so permission
//! checks never touch storage for it.

use std::collections::{HashMap, HashSet};

use super::{Permission, Role};

/// Raised when a role has no entry in the table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("role {role} has no permission entry")]
pub struct UnmappedRole {
    /// Role that could not be resolved.
    pub role: Role,
}

/// Immutable mapping from [`Role`] to the permissions it grants.
///
/// # Examples
/// ```
/// use shortlink_core::domain::rbac::{Permission, PermissionTable, Role};
///
/// let table = PermissionTable::standard();
/// assert!(table.grants(Role::ChangeLogEditor, Permission::CreateChange).unwrap());
/// assert!(!table.grants(Role::Basic, Permission::CreateChange).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionTable {
    entries: HashMap<Role, HashSet<Permission>>,
}

impl PermissionTable {
    /// Table shipped with the service.
    pub fn standard() -> Self {
        use Permission::{CreateChange, DeleteChange, UpdateChange, ViewAdminPanel, ViewChange};

        Self::from_entries([
            (Role::Basic, vec![]),
            (Role::ChangeLogViewer, vec![ViewChange]),
            (
                Role::ChangeLogEditor,
                vec![CreateChange, UpdateChange, DeleteChange, ViewChange],
            ),
            (Role::Admin, vec![ViewAdminPanel]),
        ])
    }

    /// Build a table from explicit entries. Roles left out are unmapped.
    pub fn from_entries<I, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Role, P)>,
        P: IntoIterator<Item = Permission>,
    {
        let entries = entries
            .into_iter()
            .map(|(role, permissions)| (role, permissions.into_iter().collect()))
            .collect();
        Self { entries }
    }

    /// Permissions granted by `role`.
    pub fn permissions_for(&self, role: Role) -> Result<&HashSet<Permission>, UnmappedRole> {
        self.entries.get(&role).ok_or(UnmappedRole { role })
    }

    /// Whether `role` grants `permission`.
    pub fn grants(&self, role: Role, permission: Permission) -> Result<bool, UnmappedRole> {
        self.permissions_for(role)
            .map(|permissions| permissions.contains(&permission))
    }
}

impl Default for PermissionTable {
    fn default() -> Self {
        Self::standard()
    }
}
