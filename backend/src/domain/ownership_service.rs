//! Short link ownership.

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use crate::domain::ports::{UserShortLinkRepository, UserShortLinkRepositoryError};
use crate::domain::{Alias, Error, ShortLinkId, ShortLinkInput, User, UserId};

/// Domain view over the user to short link relation.
#[derive(Clone)]
pub struct OwnershipService<R> {
    relations: Arc<R>,
}

impl<R> OwnershipService<R> {
    /// Create a service over `relations`.
    pub fn new(relations: Arc<R>) -> Self {
        Self { relations }
    }
}

impl<R> OwnershipService<R>
where
    R: UserShortLinkRepository,
{
    fn map_error(error: UserShortLinkRepositoryError) -> Error {
        match error {
            UserShortLinkRepositoryError::Connection { message } => Error::service_unavailable(
                format!("user short link repository unavailable: {message}"),
            ),
            UserShortLinkRepositoryError::Query { message } => {
                Error::internal(format!("user short link repository error: {message}"))
            }
            UserShortLinkRepositoryError::Duplicate { short_link_id } => {
                Error::conflict(format!("short link {short_link_id} already has an owner"))
                    .with_details(json!({ "shortLinkId": short_link_id }))
            }
        }
    }

    /// Record `user_id` as the owner of a newly created link.
    ///
    /// Call this in the same transaction scope as link creation. A link that
    /// already has an owner yields [`ErrorCode::Conflict`](crate::domain::ErrorCode::Conflict).
    pub async fn create_relation(&self, user_id: &UserId, link: &ShortLinkInput) -> Result<(), Error> {
        self.relations
            .create_relation(user_id, link)
            .await
            .map_err(Self::map_error)?;
        debug!(user_id = %user_id, short_link_id = %link.id, "ownership recorded");
        Ok(())
    }

    /// Owner of `short_link_id`.
    ///
    /// Unowned links yield [`ErrorCode::NotFound`](crate::domain::ErrorCode::NotFound),
    /// which callers treat as an anonymous link rather than a failure.
    pub async fn get_user_by_short_link(&self, short_link_id: &ShortLinkId) -> Result<User, Error> {
        self.relations
            .find_user_by_short_link(short_link_id)
            .await
            .map_err(Self::map_error)?
            .ok_or_else(|| Error::not_found(format!("short link {short_link_id} has no owner")))
    }

    /// Aliases owned by `user_id`. Empty when the user owns nothing.
    pub async fn find_aliases_by_user(&self, user_id: &UserId) -> Result<Vec<Alias>, Error> {
        self.relations
            .find_aliases_by_user(user_id)
            .await
            .map_err(Self::map_error)
    }

    /// Short link IDs owned by `user_id`.
    pub async fn find_short_link_ids_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<ShortLinkId>, Error> {
        self.relations
            .find_short_link_ids_by_user(user_id)
            .await
            .map_err(Self::map_error)
    }

    /// Whether `user_id` owns the link recorded under `alias`.
    pub async fn has_mapping(&self, user_id: &UserId, alias: &Alias) -> Result<bool, Error> {
        self.relations
            .has_mapping(user_id, alias)
            .await
            .map_err(Self::map_error)
    }
}
