//! Behaviour tests for role-based permission checks.
//!
//! Scenarios run the RBAC authorizer over the in-process role store so the
//! role table and the store agree on every assignment.

use std::cell::RefCell;
use std::sync::Arc;

use futures::executor::block_on;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use shortlink_core::domain::ports::Authorizer;
use shortlink_core::domain::rbac::{Permission, PermissionTable, RbacAuthorizer, Role};
use shortlink_core::domain::{Error, UserId};
use shortlink_core::outbound::memory::InMemoryUserRoleRepository;

struct RbacWorld {
    authorizer: RbacAuthorizer<InMemoryUserRoleRepository>,
    outcome: RefCell<Option<Result<bool, Error>>>,
}

impl RbacWorld {
    fn new() -> Self {
        let roles = Arc::new(InMemoryUserRoleRepository::new());
        Self {
            authorizer: RbacAuthorizer::new(roles, Arc::new(PermissionTable::standard())),
            outcome: RefCell::new(None),
        }
    }

    fn grant(&self, user: &str, role: Role) {
        block_on(self.authorizer.grant_role(&user_id(user), role)).expect("grant role");
    }

    fn granted(&self) -> bool {
        self.outcome
            .borrow()
            .as_ref()
            .expect("permission check recorded")
            .clone()
            .expect("permission check succeeds")
    }
}

fn user_id(value: &str) -> UserId {
    UserId::new(value).expect("valid user id")
}

#[fixture]
fn world() -> RbacWorld {
    RbacWorld::new()
}

#[given("user \"{user}\" holds the roles \"{roles}\"")]
fn user_holds_roles(world: &RbacWorld, user: String, roles: String) {
    for name in roles.split(',') {
        let role: Role = name.trim().parse().expect("known role");
        world.grant(&user, role);
    }
}

#[given("user \"{user}\" holds no roles")]
fn user_holds_no_roles(world: &RbacWorld, user: String) {
    let held = block_on(world.authorizer.roles(&user_id(&user))).expect("role lookup");
    assert!(held.is_empty());
}

#[when("the role \"{role}\" is granted to \"{user}\"")]
fn role_is_granted(world: &RbacWorld, role: String, user: String) {
    let role: Role = role.parse().expect("known role");
    world.grant(&user, role);
}

#[when("the authorizer checks \"{permission}\" for \"{user}\"")]
fn authorizer_checks(world: &RbacWorld, permission: String, user: String) {
    let permission: Permission = permission.parse().expect("known permission");
    let outcome = block_on(world.authorizer.has_permission(&user_id(&user), permission));
    world.outcome.replace(Some(outcome));
}

#[then("the permission is granted")]
fn permission_is_granted(world: &RbacWorld) {
    assert!(world.granted());
}

#[then("the permission is denied")]
fn permission_is_denied(world: &RbacWorld) {
    assert!(!world.granted());
}

#[scenario(path = "tests/features/rbac.feature")]
fn rbac_scenarios(world: RbacWorld) {
    drop(world);
}
