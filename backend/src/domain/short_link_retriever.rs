//! Short link resolution.
//!
//! Alias lookups may see several stored variants when an alias is reused
//! over time. The resolver keeps those active at the reference time and
//! picks the most recently created one, breaking ties on the greater ID.
//! More than one active variant is a data-integrity fault and is logged.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::domain::ports::{
    ShortLinkRepository, ShortLinkRepositoryError, UserShortLinkRepository,
    UserShortLinkRepositoryError,
};
use crate::domain::{Alias, Error, ShortLink, ShortLinkId, UserId};

/// Resolves short links by ID, by alias at a point in time, and by owner.
#[derive(Clone)]
pub struct ShortLinkRetriever<L, R> {
    links: Arc<L>,
    relations: Arc<R>,
}

impl<L, R> ShortLinkRetriever<L, R> {
    /// Create a resolver over the link store and the ownership relation.
    pub fn new(links: Arc<L>, relations: Arc<R>) -> Self {
        Self { links, relations }
    }
}

/// Pick the variant active at `at`, if any.
fn select_active(alias: &Alias, candidates: Vec<ShortLink>, at: DateTime<Utc>) -> Option<ShortLink> {
    let mut active: Vec<ShortLink> = candidates
        .into_iter()
        .filter(|link| link.is_active_at(at))
        .collect();
    if active.len() > 1 {
        warn!(
            %alias,
            at = %at,
            candidates = active.len(),
            "alias has several unexpired variants; most recently created link wins"
        );
    }
    active.sort_by(|a, b| {
        a.created_at()
            .cmp(&b.created_at())
            .then_with(|| a.id().cmp(b.id()))
    });
    active.pop()
}

impl<L, R> ShortLinkRetriever<L, R>
where
    L: ShortLinkRepository,
    R: UserShortLinkRepository,
{
    fn map_link_error(error: ShortLinkRepositoryError) -> Error {
        match error {
            ShortLinkRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("short link repository unavailable: {message}"))
            }
            ShortLinkRepositoryError::Query { message } => {
                Error::internal(format!("short link repository error: {message}"))
            }
            err @ ShortLinkRepositoryError::InvalidRecord { .. } => Error::internal(err.to_string()),
        }
    }

    fn map_relation_error(error: UserShortLinkRepositoryError) -> Error {
        match error {
            UserShortLinkRepositoryError::Connection { message } => Error::service_unavailable(
                format!("user short link repository unavailable: {message}"),
            ),
            other => Error::internal(format!("user short link repository error: {other}")),
        }
    }

    /// Fetch a link by ID regardless of its expiry.
    pub async fn get_short_link(&self, id: &ShortLinkId) -> Result<ShortLink, Error> {
        self.links
            .find_by_id(id)
            .await
            .map_err(Self::map_link_error)?
            .ok_or_else(|| Error::not_found(format!("short link {id} not found")))
    }

    /// Fetch the variant of `alias` active at `at`.
    pub async fn get_active_short_link(
        &self,
        alias: &Alias,
        at: DateTime<Utc>,
    ) -> Result<ShortLink, Error> {
        let candidates = self
            .links
            .find_by_alias(alias)
            .await
            .map_err(Self::map_link_error)?;
        debug!(%alias, candidates = candidates.len(), "resolving active short link");

        select_active(alias, candidates, at)
            .ok_or_else(|| Error::not_found(format!("no active short link for alias {alias}")))
    }

    /// Every link owned by `user_id`, in the order of the ownership index.
    pub async fn get_short_links_by_user(&self, user_id: &UserId) -> Result<Vec<ShortLink>, Error> {
        let ids = self
            .relations
            .find_short_link_ids_by_user(user_id)
            .await
            .map_err(Self::map_relation_error)?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let position: HashMap<&ShortLinkId, usize> =
            ids.iter().enumerate().map(|(i, id)| (id, i)).collect();
        let mut links = self
            .links
            .find_by_ids(&ids)
            .await
            .map_err(Self::map_link_error)?;
        links.sort_by_key(|link| position.get(link.id()).copied().unwrap_or(usize::MAX));
        Ok(links)
    }
}
