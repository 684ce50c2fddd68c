//! Behaviour tests for short link ownership.

use std::cell::RefCell;
use std::sync::Arc;

use futures::executor::block_on;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use shortlink_core::domain::{
    Alias, Error, ErrorCode, OwnershipService, ShortLinkId, ShortLinkInput, User, UserId,
};
use shortlink_core::outbound::memory::InMemoryUserShortLinkRepository;

struct OwnershipWorld {
    relations: Arc<InMemoryUserShortLinkRepository>,
    service: OwnershipService<InMemoryUserShortLinkRepository>,
    mapping: RefCell<Option<bool>>,
    claim: RefCell<Option<Result<(), Error>>>,
    owner: RefCell<Option<Result<User, Error>>>,
}

impl OwnershipWorld {
    fn new() -> Self {
        let relations = Arc::new(InMemoryUserShortLinkRepository::new());
        Self {
            service: OwnershipService::new(Arc::clone(&relations)),
            relations,
            mapping: RefCell::new(None),
            claim: RefCell::new(None),
            owner: RefCell::new(None),
        }
    }

    fn claim(&self, user: &str, id: &str, alias: &str) -> Result<(), Error> {
        let input = ShortLinkInput {
            id: ShortLinkId::new(id).expect("valid id"),
            alias: Alias::new(alias).expect("valid alias"),
        };
        block_on(self.service.create_relation(&user_id(user), &input))
    }
}

fn user_id(value: &str) -> UserId {
    UserId::new(value).expect("valid user id")
}

fn error_code(name: String) -> ErrorCode {
    serde_json::from_value(serde_json::Value::String(name)).expect("known error code")
}

#[fixture]
fn world() -> OwnershipWorld {
    OwnershipWorld::new()
}

#[given("user \"{user}\" owns short link \"{id}\" with alias \"{alias}\"")]
fn user_owns_short_link(world: &OwnershipWorld, user: String, id: String, alias: String) {
    world
        .relations
        .register_user(User::new(user_id(&user)).with_email(format!("{user}@example.com")))
        .expect("register user");
    world.claim(&user, &id, &alias).expect("first claim succeeds");
}

#[given("no relations are recorded")]
fn no_relations_are_recorded(world: &OwnershipWorld) {
    let owned = block_on(world.service.find_aliases_by_user(&user_id("alpha")))
        .expect("alias lookup");
    assert!(owned.is_empty());
}

#[when("ownership of alias \"{alias}\" is checked for \"{user}\"")]
fn ownership_is_checked(world: &OwnershipWorld, alias: String, user: String) {
    let alias = Alias::new(alias).expect("valid alias");
    let mapped = block_on(world.service.has_mapping(&user_id(&user), &alias))
        .expect("mapping lookup");
    world.mapping.replace(Some(mapped));
}

#[when("user \"{user}\" claims short link \"{id}\" with alias \"{alias}\"")]
fn user_claims_short_link(world: &OwnershipWorld, user: String, id: String, alias: String) {
    let outcome = world.claim(&user, &id, &alias);
    world.claim.replace(Some(outcome));
}

#[when("the owner of short link \"{id}\" is requested")]
fn owner_is_requested(world: &OwnershipWorld, id: String) {
    let id = ShortLinkId::new(id).expect("valid id");
    let outcome = block_on(world.service.get_user_by_short_link(&id));
    world.owner.replace(Some(outcome));
}

#[then("the mapping exists")]
fn mapping_exists(world: &OwnershipWorld) {
    assert_eq!(*world.mapping.borrow(), Some(true));
}

#[then("the mapping does not exist")]
fn mapping_does_not_exist(world: &OwnershipWorld) {
    assert_eq!(*world.mapping.borrow(), Some(false));
}

#[then("the claim fails with \"{code}\"")]
fn claim_fails_with(world: &OwnershipWorld, code: String) {
    let claim = world.claim.borrow();
    let err = claim
        .as_ref()
        .expect("claim recorded")
        .as_ref()
        .expect_err("claim rejected");
    assert_eq!(err.code(), error_code(code));
}

#[then("the owner lookup fails with \"{code}\"")]
fn owner_lookup_fails_with(world: &OwnershipWorld, code: String) {
    let owner = world.owner.borrow();
    let err = owner
        .as_ref()
        .expect("lookup recorded")
        .as_ref()
        .expect_err("lookup fails");
    assert_eq!(err.code(), error_code(code));
}

#[scenario(path = "tests/features/ownership.feature")]
fn ownership_scenarios(world: OwnershipWorld) {
    drop(world);
}
