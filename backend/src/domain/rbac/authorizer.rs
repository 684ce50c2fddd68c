//! Role-based permission checks.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::ports::{
    Authorizer, Instrumentation, InstrumentationEvent, NoOpInstrumentation, RoleSet,
    UserRoleRepository, UserRoleRepositoryError,
};
use crate::domain::{Error, UserId};

use super::{Permission, PermissionTable, Role, UnmappedRole};

/// Authorizer backed by a role store and the static permission table.
#[derive(Clone)]
pub struct RbacAuthorizer<R> {
    roles: Arc<R>,
    table: Arc<PermissionTable>,
    instrumentation: Arc<dyn Instrumentation>,
}

impl<R> RbacAuthorizer<R> {
    /// Create an authorizer over `roles` and `table`.
    pub fn new(roles: Arc<R>, table: Arc<PermissionTable>) -> Self {
        Self {
            roles,
            table,
            instrumentation: Arc::new(NoOpInstrumentation),
        }
    }

    /// Emit a `PermissionChecked` event for every answered check.
    #[must_use]
    pub fn with_instrumentation(mut self, instrumentation: Arc<dyn Instrumentation>) -> Self {
        self.instrumentation = instrumentation;
        self
    }
}

impl<R> RbacAuthorizer<R>
where
    R: UserRoleRepository,
{
    fn map_role_error(error: UserRoleRepositoryError) -> Error {
        match error {
            UserRoleRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("role repository unavailable: {message}"))
            }
            UserRoleRepositoryError::Query { message } => {
                Error::internal(format!("role repository error: {message}"))
            }
        }
    }

    fn unknown_role(name: &str) -> Error {
        Error::internal(format!("role repository returned unknown role {name}"))
            .with_details(json!({ "role": name }))
    }

    fn unmapped_role(error: &UnmappedRole) -> Error {
        Error::internal(error.to_string()).with_details(json!({ "role": error.role }))
    }

    fn answer(&self, user_id: &UserId, permission: Permission, granted: bool) -> bool {
        debug!(user_id = %user_id, %permission, granted, "permission checked");
        self.instrumentation
            .record(&InstrumentationEvent::PermissionChecked {
                user_id: user_id.clone(),
                permission,
                granted,
            });
        granted
    }

    /// Roles currently held by `user_id`, including stored names that no
    /// longer parse.
    pub async fn roles(&self, user_id: &UserId) -> Result<RoleSet, Error> {
        self.roles
            .get_roles(user_id)
            .await
            .map_err(Self::map_role_error)
    }

    /// Assign `role` to `user_id`. Assigning a held role is a no-op.
    pub async fn grant_role(&self, user_id: &UserId, role: Role) -> Result<(), Error> {
        self.roles
            .add_role(user_id, role)
            .await
            .map_err(Self::map_role_error)
    }

    /// Revoke `role` from `user_id`. Revoking an absent role is a no-op.
    pub async fn revoke_role(&self, user_id: &UserId, role: Role) -> Result<(), Error> {
        self.roles
            .delete_role(user_id, role)
            .await
            .map_err(Self::map_role_error)
    }
}

#[async_trait]
impl<R> Authorizer for RbacAuthorizer<R>
where
    R: UserRoleRepository,
{
    async fn has_permission(
        &self,
        user_id: &UserId,
        permission: Permission,
    ) -> Result<bool, Error> {
        let RoleSet { known, unknown } = self.roles(user_id).await?;

        // Faults on one role must not hide a grant from another.
        let mut deferred: Option<Error> = None;
        for name in &unknown {
            warn!(user_id = %user_id, role = %name, "stored role name not recognised");
            deferred.get_or_insert_with(|| Self::unknown_role(name));
        }
        for role in known {
            match self.table.grants(role, permission) {
                Ok(true) => return Ok(self.answer(user_id, permission, true)),
                Ok(false) => {}
                Err(err) => {
                    warn!(user_id = %user_id, role = %err.role, "role missing from permission table");
                    deferred.get_or_insert_with(|| Self::unmapped_role(&err));
                }
            }
        }

        match deferred {
            Some(err) => Err(err),
            None => Ok(self.answer(user_id, permission, false)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockInstrumentation, MockUserRoleRepository};
    use mockall::predicate::eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn alpha() -> UserId {
        UserId::new("alpha").expect("valid id")
    }

    fn authorizer_with(
        roles: Vec<Role>,
        table: PermissionTable,
    ) -> RbacAuthorizer<MockUserRoleRepository> {
        authorizer_with_stored(roles.into_iter().collect(), table)
    }

    fn authorizer_with_stored(
        stored: RoleSet,
        table: PermissionTable,
    ) -> RbacAuthorizer<MockUserRoleRepository> {
        let mut repo = MockUserRoleRepository::new();
        repo.expect_get_roles()
            .times(1)
            .return_once(move |_| Ok(stored));
        RbacAuthorizer::new(Arc::new(repo), Arc::new(table))
    }

    #[rstest]
    #[case(vec![], Permission::CreateChange, false)]
    #[case(vec![Role::Basic], Permission::CreateChange, false)]
    #[case(vec![Role::ChangeLogEditor, Role::Admin], Permission::CreateChange, true)]
    #[case(vec![Role::Admin, Role::ChangeLogEditor], Permission::CreateChange, true)]
    #[case(vec![Role::Basic, Role::ChangeLogViewer], Permission::ViewChange, true)]
    #[case(vec![Role::ChangeLogViewer, Role::Admin], Permission::DeleteChange, false)]
    #[case(vec![Role::Admin, Role::Admin], Permission::ViewAdminPanel, true)]
    #[tokio::test]
    async fn aggregates_permissions_across_roles(
        alpha: UserId,
        #[case] roles: Vec<Role>,
        #[case] permission: Permission,
        #[case] expected: bool,
    ) {
        let authorizer = authorizer_with(roles, PermissionTable::standard());
        let granted = authorizer
            .has_permission(&alpha, permission)
            .await
            .expect("check succeeds");
        assert_eq!(granted, expected);
    }

    #[rstest]
    #[tokio::test]
    async fn storage_fault_is_propagated(alpha: UserId) {
        let mut repo = MockUserRoleRepository::new();
        repo.expect_get_roles()
            .with(eq(alpha.clone()))
            .return_once(|_| Err(UserRoleRepositoryError::connection("refused")));
        let authorizer = RbacAuthorizer::new(Arc::new(repo), Arc::new(PermissionTable::standard()));

        let err = authorizer
            .has_permission(&alpha, Permission::ViewChange)
            .await
            .expect_err("connection fault surfaces");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }

    #[rstest]
    #[tokio::test]
    async fn later_grant_wins_over_earlier_unmapped_role(alpha: UserId) {
        let table = PermissionTable::from_entries([(
            Role::ChangeLogEditor,
            [Permission::CreateChange],
        )]);
        let authorizer = authorizer_with(vec![Role::Admin, Role::ChangeLogEditor], table);

        let granted = authorizer
            .has_permission(&alpha, Permission::CreateChange)
            .await
            .expect("grant found after unmapped role");
        assert!(granted);
    }

    #[rstest]
    #[tokio::test]
    async fn unmapped_role_without_grant_is_an_error(alpha: UserId) {
        let table = PermissionTable::from_entries([(Role::Basic, Vec::<Permission>::new())]);
        let authorizer = authorizer_with(vec![Role::Basic, Role::Admin], table);

        let err = authorizer
            .has_permission(&alpha, Permission::ViewAdminPanel)
            .await
            .expect_err("unmapped role surfaces");
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(err.details(), Some(&json!({ "role": "admin" })));
    }

    #[rstest]
    #[tokio::test]
    async fn known_grant_wins_over_unknown_stored_role(alpha: UserId) {
        let stored = RoleSet {
            known: vec![Role::ChangeLogEditor],
            unknown: vec!["legacy_role".to_owned()],
        };
        let authorizer = authorizer_with_stored(stored, PermissionTable::standard());

        let granted = authorizer
            .has_permission(&alpha, Permission::CreateChange)
            .await
            .expect("known role still grants");
        assert!(granted);
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_stored_role_without_grant_is_an_error(alpha: UserId) {
        let stored = RoleSet::from_names(["legacy_role"]);
        let authorizer = authorizer_with_stored(stored, PermissionTable::standard());

        let err = authorizer
            .has_permission(&alpha, Permission::CreateChange)
            .await
            .expect_err("unknown role surfaces");
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(err.details(), Some(&json!({ "role": "legacy_role" })));
    }

    #[rstest]
    #[tokio::test]
    async fn records_permission_checked_event(alpha: UserId) {
        let mut instrumentation = MockInstrumentation::new();
        let expected = InstrumentationEvent::PermissionChecked {
            user_id: alpha.clone(),
            permission: Permission::ViewAdminPanel,
            granted: true,
        };
        instrumentation
            .expect_record()
            .withf(move |event| *event == expected)
            .times(1)
            .return_const(());
        let authorizer = authorizer_with(vec![Role::Admin], PermissionTable::standard())
            .with_instrumentation(Arc::new(instrumentation));

        assert!(
            authorizer
                .has_permission(&alpha, Permission::ViewAdminPanel)
                .await
                .expect("check succeeds")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn grant_role_delegates_to_store(alpha: UserId) {
        let mut repo = MockUserRoleRepository::new();
        repo.expect_add_role()
            .with(eq(alpha.clone()), eq(Role::Admin))
            .times(1)
            .return_once(|_, _| Ok(()));
        let authorizer = RbacAuthorizer::new(Arc::new(repo), Arc::new(PermissionTable::standard()));

        authorizer
            .grant_role(&alpha, Role::Admin)
            .await
            .expect("grant succeeds");
    }
}
