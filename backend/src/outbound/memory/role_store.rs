//! In-process role store.

use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::UserId;
use crate::domain::ports::{RoleSet, UserRoleRepository, UserRoleRepositoryError};
use crate::domain::rbac::Role;

/// Role assignments held in a mutex-guarded map.
#[derive(Debug, Default)]
pub struct InMemoryUserRoleRepository {
    assignments: Mutex<HashMap<UserId, BTreeSet<Role>>>,
}

impl InMemoryUserRoleRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with the given assignments.
    pub fn with_assignments(assignments: impl IntoIterator<Item = (UserId, Vec<Role>)>) -> Self {
        let assignments = assignments
            .into_iter()
            .map(|(user_id, roles)| (user_id, roles.into_iter().collect()))
            .collect();
        Self {
            assignments: Mutex::new(assignments),
        }
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<UserId, BTreeSet<Role>>>, UserRoleRepositoryError>
    {
        self.assignments
            .lock()
            .map_err(|_| UserRoleRepositoryError::query("role store lock poisoned"))
    }
}

#[async_trait]
impl UserRoleRepository for InMemoryUserRoleRepository {
    async fn get_roles(&self, user_id: &UserId) -> Result<RoleSet, UserRoleRepositoryError> {
        let guard = self.lock()?;
        Ok(guard
            .get(user_id)
            .map(|roles| roles.iter().copied().collect())
            .unwrap_or_default())
    }

    async fn add_role(&self, user_id: &UserId, role: Role) -> Result<(), UserRoleRepositoryError> {
        let mut guard = self.lock()?;
        guard.entry(user_id.clone()).or_default().insert(role);
        Ok(())
    }

    async fn delete_role(
        &self,
        user_id: &UserId,
        role: Role,
    ) -> Result<(), UserRoleRepositoryError> {
        let mut guard = self.lock()?;
        if let Some(roles) = guard.get_mut(user_id) {
            roles.remove(&role);
            if roles.is_empty() {
                guard.remove(user_id);
            }
        }
        Ok(())
    }
}
