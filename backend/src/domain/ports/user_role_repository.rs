//! Port for role assignment storage.
//!
//! A user's role set has no defined order and duplicates carry no meaning.
//! Adapters may return roles in any order; `add_role` is idempotent and
//! `delete_role` is a no-op when the role is not assigned. A stored name that
//! no longer matches a [`Role`] is returned in [`RoleSet::unknown`] rather than
//! failing the whole lookup.

use async_trait::async_trait;

use crate::domain::UserId;
use crate::domain::rbac::Role;

use super::define_port_error;

define_port_error! {
    /// Errors raised by role store adapters.
    pub enum UserRoleRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "role repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "role repository query failed: {message}",
    }
}

/// Roles held by one user, split by whether the stored name still parses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSet {
    /// Recognised roles.
    pub known: Vec<Role>,
    /// Stored names with no matching [`Role`].
    pub unknown: Vec<String>,
}

impl RoleSet {
    /// Sort stored role names into known and unknown entries.
    pub fn from_names<I>(names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut set = Self::default();
        for name in names {
            let name = name.into();
            match name.parse::<Role>() {
                Ok(role) => set.known.push(role),
                Err(_) => set.unknown.push(name),
            }
        }
        set
    }

    /// True when the user holds nothing, recognised or not.
    pub fn is_empty(&self) -> bool {
        self.known.is_empty() && self.unknown.is_empty()
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<T: IntoIterator<Item = Role>>(iter: T) -> Self {
        Self {
            known: iter.into_iter().collect(),
            unknown: Vec::new(),
        }
    }
}

/// Role assignments per user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRoleRepository: Send + Sync {
    /// Roles currently held by `user_id`. Unknown users hold no roles.
    async fn get_roles(&self, user_id: &UserId) -> Result<RoleSet, UserRoleRepositoryError>;

    /// Assign `role` to `user_id`.
    async fn add_role(&self, user_id: &UserId, role: Role) -> Result<(), UserRoleRepositoryError>;

    /// Revoke `role` from `user_id`.
    async fn delete_role(&self, user_id: &UserId, role: Role)
    -> Result<(), UserRoleRepositoryError>;
}

/// Fixture role store where every user holds no roles and writes vanish.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRoleRepository;

#[async_trait]
impl UserRoleRepository for FixtureUserRoleRepository {
    async fn get_roles(&self, _user_id: &UserId) -> Result<RoleSet, UserRoleRepositoryError> {
        Ok(RoleSet::default())
    }

    async fn add_role(
        &self,
        _user_id: &UserId,
        _role: Role,
    ) -> Result<(), UserRoleRepositoryError> {
        Ok(())
    }

    async fn delete_role(
        &self,
        _user_id: &UserId,
        _role: Role,
    ) -> Result<(), UserRoleRepositoryError> {
        Ok(())
    }
}
