//! Authenticated query facade for transport adapters.
//!
//! Transport handlers hand over the caller's token (if any) and the request
//! arguments. The facade resolves the viewer, defaults the reference time to
//! the injected clock, and scopes results by the viewer's identity.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;

use crate::domain::feature::FeatureId;
use crate::domain::ports::{
    AuthToken, Authenticator, DecisionMaker, INVALID_AUTH_TOKEN, ShortLinkRepository,
    UserShortLinkRepository,
};
use crate::domain::{
    Alias, Error, ErrorCode, OwnershipService, ShortLink, ShortLinkId, ShortLinkRetriever, User,
};

/// Query surface combining resolution, ownership, and feature checks.
pub struct LinkQuery<L, R> {
    authenticator: Arc<dyn Authenticator>,
    retriever: ShortLinkRetriever<L, R>,
    ownership: OwnershipService<R>,
    decisions: Arc<dyn DecisionMaker>,
    clock: Arc<dyn Clock>,
}

impl<L, R> LinkQuery<L, R> {
    /// Assemble the facade.
    pub fn new(
        authenticator: Arc<dyn Authenticator>,
        links: Arc<L>,
        relations: Arc<R>,
        decisions: Arc<dyn DecisionMaker>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            authenticator,
            retriever: ShortLinkRetriever::new(links, Arc::clone(&relations)),
            ownership: OwnershipService::new(relations),
            decisions,
            clock,
        }
    }
}

impl<L, R> LinkQuery<L, R>
where
    L: ShortLinkRepository,
    R: UserShortLinkRepository,
{
    async fn viewer(&self, token: Option<&AuthToken>) -> Result<Option<User>, Error> {
        match token {
            Some(token) => self.authenticator.resolve_user(token).await.map(Some),
            None => Ok(None),
        }
    }

    async fn require_viewer(&self, token: Option<&AuthToken>) -> Result<User, Error> {
        self.viewer(token)
            .await?
            .ok_or_else(|| Error::unauthorized(INVALID_AUTH_TOKEN))
    }

    /// Link by ID regardless of expiry.
    pub async fn short_link(&self, id: &ShortLinkId) -> Result<ShortLink, Error> {
        self.retriever.get_short_link(id).await
    }

    /// Link active under `alias` at `at`, or now when `at` is omitted.
    pub async fn active_short_link(
        &self,
        alias: &Alias,
        at: Option<DateTime<Utc>>,
    ) -> Result<ShortLink, Error> {
        let at = at.unwrap_or_else(|| self.clock.utc());
        self.retriever.get_active_short_link(alias, at).await
    }

    /// Owner of `id`; `None` for anonymous links.
    pub async fn user_by_short_link(&self, id: &ShortLinkId) -> Result<Option<User>, Error> {
        match self.ownership.get_user_by_short_link(id).await {
            Ok(user) => Ok(Some(user)),
            Err(err) if err.code() == ErrorCode::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Links owned by the authenticated viewer.
    pub async fn short_links(&self, token: Option<&AuthToken>) -> Result<Vec<ShortLink>, Error> {
        let viewer = self.require_viewer(token).await?;
        self.retriever.get_short_links_by_user(viewer.id()).await
    }

    /// Whether the authenticated viewer owns the variant of `alias` active
    /// now. Owning an expired variant of the same alias does not count.
    pub async fn can_mutate(&self, token: Option<&AuthToken>, alias: &Alias) -> Result<bool, Error> {
        let viewer = self.require_viewer(token).await?;
        let link = match self
            .retriever
            .get_active_short_link(alias, self.clock.utc())
            .await
        {
            Ok(link) => link,
            Err(err) if err.code() == ErrorCode::NotFound => return Ok(false),
            Err(err) => return Err(err),
        };
        let owner = self.user_by_short_link(link.id()).await?;
        Ok(owner.is_some_and(|owner| owner.id() == viewer.id()))
    }

    /// Whether `feature` is on for the caller. Anonymous callers are allowed;
    /// an invalid token is still rejected.
    pub async fn is_feature_enabled(
        &self,
        token: Option<&AuthToken>,
        feature: &FeatureId,
    ) -> Result<bool, Error> {
        let viewer = self.viewer(token).await?;
        self.decisions
            .is_feature_enabled(feature, viewer.as_ref())
            .await
    }
}
