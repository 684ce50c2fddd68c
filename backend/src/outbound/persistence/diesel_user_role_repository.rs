//! PostgreSQL-backed `UserRoleRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::UserId;
use crate::domain::ports::{RoleSet, UserRoleRepository, UserRoleRepositoryError};
use crate::domain::rbac::Role;

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::NewUserRoleRow;
use super::pool::{DbPool, PoolError};
use super::schema::user_roles;

/// Diesel implementation of the role store.
#[derive(Clone)]
pub struct DieselUserRoleRepository {
    pool: DbPool,
}

impl DieselUserRoleRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserRoleRepositoryError {
    map_basic_pool_error(error, |message| UserRoleRepositoryError::Connection { message })
}

fn map_diesel_error(error: diesel::result::Error) -> UserRoleRepositoryError {
    map_basic_diesel_error(
        error,
        UserRoleRepositoryError::query,
        UserRoleRepositoryError::connection,
    )
}

fn parse_roles(user_id: &UserId, names: Vec<String>) -> RoleSet {
    let set = RoleSet::from_names(names);
    if !set.unknown.is_empty() {
        warn!(user_id = %user_id, unknown = ?set.unknown, "stored role names not recognised");
    }
    set
}

#[async_trait]
impl UserRoleRepository for DieselUserRoleRepository {
    async fn get_roles(&self, user_id: &UserId) -> Result<RoleSet, UserRoleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let names: Vec<String> = user_roles::table
            .filter(user_roles::user_id.eq(user_id.as_ref()))
            .select(user_roles::role)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(parse_roles(user_id, names))
    }

    async fn add_role(&self, user_id: &UserId, role: Role) -> Result<(), UserRoleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(user_roles::table)
            .values(&NewUserRoleRow {
                user_id: user_id.as_ref(),
                role: role.as_str(),
            })
            .on_conflict_do_nothing()
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn delete_role(
        &self,
        user_id: &UserId,
        role: Role,
    ) -> Result<(), UserRoleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(
            user_roles::table
                .filter(user_roles::user_id.eq(user_id.as_ref()))
                .filter(user_roles::role.eq(role.as_str())),
        )
        .execute(&mut conn)
        .await
        .map(|_| ())
        .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn alpha() -> UserId {
        UserId::new("alpha").expect("valid id")
    }

    #[rstest]
    fn stored_names_parse_into_roles() {
        let set = parse_roles(&alpha(), vec!["admin".to_owned(), "basic".to_owned()]);
        assert_eq!(set.known, vec![Role::Admin, Role::Basic]);
        assert!(set.unknown.is_empty());
    }

    #[rstest]
    fn unknown_stored_name_does_not_hide_known_roles() {
        let set = parse_roles(&alpha(), vec!["admin".to_owned(), "root".to_owned()]);
        assert_eq!(set.known, vec![Role::Admin]);
        assert_eq!(set.unknown, vec!["root".to_owned()]);
    }

    #[rstest]
    fn pool_failure_maps_to_connection() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, UserRoleRepositoryError::connection("timed out"));
    }
}
