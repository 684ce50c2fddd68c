//! Read port for short link records.
//!
//! Alias lookups return every stored variant of the alias; choosing the one
//! active at a reference time is domain logic, not adapter logic.

use async_trait::async_trait;

use crate::domain::{Alias, ShortLink, ShortLinkId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by short link adapters.
    pub enum ShortLinkRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "short link repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "short link repository query failed: {message}",
        /// A stored row could not be turned into a valid short link.
        InvalidRecord { id: String, message: String } =>
            "short link {id} is malformed: {message}",
    }
}

/// Short link lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortLinkRepository: Send + Sync {
    /// Fetch a link by primary identifier.
    async fn find_by_id(&self, id: &ShortLinkId)
    -> Result<Option<ShortLink>, ShortLinkRepositoryError>;

    /// Fetch every variant stored under `alias`, in any order.
    async fn find_by_alias(&self, alias: &Alias) -> Result<Vec<ShortLink>, ShortLinkRepositoryError>;

    /// Fetch the links matching `ids`. Unknown IDs are skipped.
    async fn find_by_ids(
        &self,
        ids: &[ShortLinkId],
    ) -> Result<Vec<ShortLink>, ShortLinkRepositoryError>;
}

/// Fixture store holding no links.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureShortLinkRepository;

#[async_trait]
impl ShortLinkRepository for FixtureShortLinkRepository {
    async fn find_by_id(
        &self,
        _id: &ShortLinkId,
    ) -> Result<Option<ShortLink>, ShortLinkRepositoryError> {
        Ok(None)
    }

    async fn find_by_alias(
        &self,
        _alias: &Alias,
    ) -> Result<Vec<ShortLink>, ShortLinkRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_ids(
        &self,
        _ids: &[ShortLinkId],
    ) -> Result<Vec<ShortLink>, ShortLinkRepositoryError> {
        Ok(Vec::new())
    }
}
