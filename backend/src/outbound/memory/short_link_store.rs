//! In-process short link store.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{ShortLinkRepository, ShortLinkRepositoryError};
use crate::domain::{Alias, ShortLink, ShortLinkId};

/// Short links held in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryShortLinkRepository {
    links: Mutex<Vec<ShortLink>>,
}

impl InMemoryShortLinkRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `link`, replacing any record with the same ID.
    pub fn insert(&self, link: ShortLink) -> Result<(), ShortLinkRepositoryError> {
        let mut guard = self.lock()?;
        guard.retain(|existing| existing.id() != link.id());
        guard.push(link);
        Ok(())
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, Vec<ShortLink>>, ShortLinkRepositoryError> {
        self.links
            .lock()
            .map_err(|_| ShortLinkRepositoryError::query("short link store lock poisoned"))
    }
}

#[async_trait]
impl ShortLinkRepository for InMemoryShortLinkRepository {
    async fn find_by_id(
        &self,
        id: &ShortLinkId,
    ) -> Result<Option<ShortLink>, ShortLinkRepositoryError> {
        Ok(self.lock()?.iter().find(|link| link.id() == id).cloned())
    }

    async fn find_by_alias(&self, alias: &Alias) -> Result<Vec<ShortLink>, ShortLinkRepositoryError> {
        Ok(self
            .lock()?
            .iter()
            .filter(|link| link.alias() == alias)
            .cloned()
            .collect())
    }

    async fn find_by_ids(
        &self,
        ids: &[ShortLinkId],
    ) -> Result<Vec<ShortLink>, ShortLinkRepositoryError> {
        Ok(self
            .lock()?
            .iter()
            .filter(|link| ids.contains(link.id()))
            .cloned()
            .collect())
    }
}
