//! Behaviour tests for resolving an alias to its active short link.

use std::cell::RefCell;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::executor::block_on;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use shortlink_core::domain::{
    Alias, Error, ErrorCode, LongLink, ShortLink, ShortLinkDraft, ShortLinkId, ShortLinkRetriever,
};
use shortlink_core::outbound::memory::{
    InMemoryShortLinkRepository, InMemoryUserShortLinkRepository,
};

struct ResolutionWorld {
    links: Arc<InMemoryShortLinkRepository>,
    retriever: ShortLinkRetriever<InMemoryShortLinkRepository, InMemoryUserShortLinkRepository>,
    outcome: RefCell<Option<Result<ShortLink, Error>>>,
}

impl ResolutionWorld {
    fn new() -> Self {
        let links = Arc::new(InMemoryShortLinkRepository::new());
        let relations = Arc::new(InMemoryUserShortLinkRepository::new());
        Self {
            retriever: ShortLinkRetriever::new(Arc::clone(&links), relations),
            links,
            outcome: RefCell::new(None),
        }
    }

    fn store(&self, id: &str, alias: &str, created_at: &str, expire_at: Option<&str>) {
        let draft = ShortLinkDraft {
            id: ShortLinkId::new(id).expect("valid id"),
            alias: Alias::new(alias).expect("valid alias"),
            long_link: LongLink::parse(&format!("https://example.com/{id}"))
                .expect("valid target"),
            created_at: instant(created_at),
            expire_at: expire_at.map(instant),
        };
        let link = ShortLink::new(draft).expect("valid short link");
        self.links.insert(link).expect("store short link");
    }
}

fn instant(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .expect("RFC 3339 timestamp")
        .with_timezone(&Utc)
}

#[fixture]
fn world() -> ResolutionWorld {
    ResolutionWorld::new()
}

#[given(
    "short link \"{id}\" with alias \"{alias}\" created at \"{created_at}\" and no expiry"
)]
fn short_link_without_expiry(world: &ResolutionWorld, id: String, alias: String, created_at: String) {
    world.store(&id, &alias, &created_at, None);
}

#[given(
    "short link \"{id}\" with alias \"{alias}\" created at \"{created_at}\" expiring at \"{expire_at}\""
)]
fn short_link_with_expiry(
    world: &ResolutionWorld,
    id: String,
    alias: String,
    created_at: String,
    expire_at: String,
) {
    world.store(&id, &alias, &created_at, Some(&expire_at));
}

#[when("alias \"{alias}\" is resolved at \"{at}\"")]
fn alias_is_resolved(world: &ResolutionWorld, alias: String, at: String) {
    let alias = Alias::new(alias).expect("valid alias");
    let outcome = block_on(world.retriever.get_active_short_link(&alias, instant(&at)));
    world.outcome.replace(Some(outcome));
}

#[then("short link \"{id}\" is returned")]
fn short_link_is_returned(world: &ResolutionWorld, id: String) {
    let outcome = world.outcome.borrow();
    let link = outcome
        .as_ref()
        .expect("resolution recorded")
        .as_ref()
        .expect("alias resolves");
    assert_eq!(link.id().as_str(), id);
}

#[then("the lookup fails with \"{code}\"")]
fn lookup_fails_with(world: &ResolutionWorld, code: String) {
    let outcome = world.outcome.borrow();
    let err = outcome
        .as_ref()
        .expect("resolution recorded")
        .as_ref()
        .expect_err("alias does not resolve");
    let expected: ErrorCode =
        serde_json::from_value(serde_json::Value::String(code)).expect("known error code");
    assert_eq!(err.code(), expected);
}

#[scenario(path = "tests/features/active_short_link.feature")]
fn active_short_link_scenarios(world: ResolutionWorld) {
    drop(world);
}
