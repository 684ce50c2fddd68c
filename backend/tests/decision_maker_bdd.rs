//! Behaviour tests for deployment-driven feature decisions.
//!
//! The factory is built when the feature is evaluated, so every scenario
//! sees the roles and toggles seeded by its `Given` steps.

use std::cell::{Cell, RefCell};
use std::sync::Arc;

use futures::executor::block_on;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use shortlink_core::domain::feature::{
    DecisionMakerFactory, FeatureId, FeaturePermissionTable, FeatureToggle, ToggleType,
};
use shortlink_core::domain::ports::{FeatureToggleRepository, NoOpInstrumentation};
use shortlink_core::domain::rbac::{PermissionTable, RbacAuthorizer, Role};
use shortlink_core::domain::{Deployment, User, UserId};
use shortlink_core::outbound::memory::{
    InMemoryFeatureToggleRepository, InMemoryUserRoleRepository,
};

struct DecisionWorld {
    deployment: Cell<Deployment>,
    authorizer: Arc<RbacAuthorizer<InMemoryUserRoleRepository>>,
    toggles: Arc<InMemoryFeatureToggleRepository>,
    enabled: RefCell<Option<bool>>,
}

impl DecisionWorld {
    fn new() -> Self {
        let roles = Arc::new(InMemoryUserRoleRepository::new());
        Self {
            deployment: Cell::new(Deployment::default()),
            authorizer: Arc::new(RbacAuthorizer::new(
                roles,
                Arc::new(PermissionTable::standard()),
            )),
            toggles: Arc::new(InMemoryFeatureToggleRepository::new()),
            enabled: RefCell::new(None),
        }
    }

    fn save_toggle(&self, feature: &str, is_enabled: bool) {
        let toggle = FeatureToggle {
            id: feature_id(feature),
            is_enabled,
            toggle_type: ToggleType::Permission,
        };
        block_on(self.toggles.save_toggle(&toggle)).expect("save toggle");
    }

    fn enabled(&self) -> bool {
        self.enabled.borrow().expect("feature evaluated")
    }
}

fn feature_id(value: &str) -> FeatureId {
    FeatureId::new(value).expect("valid feature id")
}

fn user_id(value: &str) -> UserId {
    UserId::new(value).expect("valid user id")
}

#[fixture]
fn world() -> DecisionWorld {
    DecisionWorld::new()
}

#[given("a \"{deployment}\" deployment")]
fn a_deployment(world: &DecisionWorld, deployment: String) {
    let deployment: Deployment = deployment.parse().expect("known deployment");
    world.deployment.set(deployment);
}

#[given("user \"{user}\" holds the roles \"{roles}\"")]
fn user_holds_roles(world: &DecisionWorld, user: String, roles: String) {
    let id = user_id(&user);
    for name in roles.split(',') {
        let role: Role = name.trim().parse().expect("known role");
        block_on(world.authorizer.grant_role(&id, role)).expect("grant role");
    }
}

#[given("the \"{feature}\" toggle is disabled")]
fn toggle_is_disabled(world: &DecisionWorld, feature: String) {
    world.save_toggle(&feature, false);
}

#[given("the \"{feature}\" toggle is enabled")]
fn toggle_is_enabled(world: &DecisionWorld, feature: String) {
    world.save_toggle(&feature, true);
}

#[when("feature \"{feature}\" is evaluated for \"{user}\"")]
fn feature_is_evaluated(world: &DecisionWorld, feature: String, user: String) {
    let factory = DecisionMakerFactory::new(
        world.deployment.get(),
        Arc::clone(&world.authorizer) as _,
        Arc::clone(&world.toggles) as _,
        Arc::new(FeaturePermissionTable::standard()),
    );
    let decision_maker = factory.new_decision_maker(Arc::new(NoOpInstrumentation));
    let user = User::new(user_id(&user));
    let enabled = block_on(decision_maker.is_feature_enabled(&feature_id(&feature), Some(&user)))
        .expect("feature evaluation");
    world.enabled.replace(Some(enabled));
}

#[then("the feature is enabled")]
fn feature_is_enabled(world: &DecisionWorld) {
    assert!(world.enabled());
}

#[then("the feature is disabled")]
fn feature_is_disabled(world: &DecisionWorld) {
    assert!(!world.enabled());
}

#[scenario(path = "tests/features/decision_maker.feature")]
fn decision_maker_scenarios(world: DecisionWorld) {
    drop(world);
}
