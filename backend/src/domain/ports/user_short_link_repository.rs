//! Port for the user to short link ownership relation.
//!
//! Each short link has at most one owner. The backing store enforces this
//! with a uniqueness constraint on the link, so a second `create_relation`
//! for the same link fails with [`UserShortLinkRepositoryError::Duplicate`].

use async_trait::async_trait;

use crate::domain::{Alias, ShortLinkId, ShortLinkInput, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by relation store adapters.
    pub enum UserShortLinkRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "user short link repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "user short link repository query failed: {message}",
        /// The short link already has an owner.
        Duplicate { short_link_id: String } =>
            "short link {short_link_id} already has an owner",
    }
}

/// Ownership relation between users and short links.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserShortLinkRepository: Send + Sync {
    /// Record `user_id` as the owner of `link`.
    async fn create_relation(
        &self,
        user_id: &UserId,
        link: &ShortLinkInput,
    ) -> Result<(), UserShortLinkRepositoryError>;

    /// Owner of `short_link_id`; `None` for unowned links.
    async fn find_user_by_short_link(
        &self,
        short_link_id: &ShortLinkId,
    ) -> Result<Option<User>, UserShortLinkRepositoryError>;

    /// Aliases owned by `user_id`, in insertion order.
    async fn find_aliases_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Alias>, UserShortLinkRepositoryError>;

    /// Short link IDs owned by `user_id`, in insertion order.
    async fn find_short_link_ids_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<ShortLinkId>, UserShortLinkRepositoryError>;

    /// Whether `user_id` owns a link recorded under `alias`.
    async fn has_mapping(
        &self,
        user_id: &UserId,
        alias: &Alias,
    ) -> Result<bool, UserShortLinkRepositoryError>;
}
