//! In-process ownership relation with a user directory.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{UserShortLinkRepository, UserShortLinkRepositoryError};
use crate::domain::{Alias, ShortLinkId, ShortLinkInput, User, UserId};

#[derive(Debug, Clone)]
struct OwnershipRow {
    user_id: UserId,
    short_link_id: ShortLinkId,
    alias: Alias,
}

#[derive(Debug, Default)]
struct RelationState {
    rows: Vec<OwnershipRow>,
    users: HashMap<UserId, User>,
}

/// Ownership rows kept in insertion order.
///
/// The short link ID is unique across rows, mirroring the primary key of the
/// relational table. Owners are resolved through a user directory seeded with
/// [`InMemoryUserShortLinkRepository::register_user`]; an owner missing from
/// the directory is returned with only its ID.
#[derive(Debug, Default)]
pub struct InMemoryUserShortLinkRepository {
    state: Mutex<RelationState>,
}

impl InMemoryUserShortLinkRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a user in the directory.
    pub fn register_user(&self, user: User) -> Result<(), UserShortLinkRepositoryError> {
        self.lock()?.users.insert(user.id().clone(), user);
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, RelationState>, UserShortLinkRepositoryError> {
        self.state
            .lock()
            .map_err(|_| UserShortLinkRepositoryError::query("relation store lock poisoned"))
    }
}

#[async_trait]
impl UserShortLinkRepository for InMemoryUserShortLinkRepository {
    async fn create_relation(
        &self,
        user_id: &UserId,
        link: &ShortLinkInput,
    ) -> Result<(), UserShortLinkRepositoryError> {
        let mut guard = self.lock()?;
        if guard.rows.iter().any(|row| row.short_link_id == link.id) {
            return Err(UserShortLinkRepositoryError::duplicate(link.id.as_str()));
        }
        guard.rows.push(OwnershipRow {
            user_id: user_id.clone(),
            short_link_id: link.id.clone(),
            alias: link.alias.clone(),
        });
        Ok(())
    }

    async fn find_user_by_short_link(
        &self,
        short_link_id: &ShortLinkId,
    ) -> Result<Option<User>, UserShortLinkRepositoryError> {
        let guard = self.lock()?;
        Ok(guard
            .rows
            .iter()
            .find(|row| &row.short_link_id == short_link_id)
            .map(|row| {
                guard
                    .users
                    .get(&row.user_id)
                    .cloned()
                    .unwrap_or_else(|| User::new(row.user_id.clone()))
            }))
    }

    async fn find_aliases_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Alias>, UserShortLinkRepositoryError> {
        Ok(self
            .lock()?
            .rows
            .iter()
            .filter(|row| &row.user_id == user_id)
            .map(|row| row.alias.clone())
            .collect())
    }

    async fn find_short_link_ids_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<ShortLinkId>, UserShortLinkRepositoryError> {
        Ok(self
            .lock()?
            .rows
            .iter()
            .filter(|row| &row.user_id == user_id)
            .map(|row| row.short_link_id.clone())
            .collect())
    }

    async fn has_mapping(
        &self,
        user_id: &UserId,
        alias: &Alias,
    ) -> Result<bool, UserShortLinkRepositoryError> {
        Ok(self
            .lock()?
            .rows
            .iter()
            .any(|row| &row.user_id == user_id && &row.alias == alias))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn input(id: &str, alias: &str) -> ShortLinkInput {
        ShortLinkInput {
            id: ShortLinkId::new(id).expect("valid id"),
            alias: Alias::new(alias).expect("valid alias"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn second_owner_for_a_link_is_rejected() {
        let store = InMemoryUserShortLinkRepository::new();
        let alpha = UserId::new("alpha").expect("valid id");
        let beta = UserId::new("beta").expect("valid id");
        store
            .create_relation(&alpha, &input("1", "promo"))
            .await
            .expect("first owner");

        let err = store
            .create_relation(&beta, &input("1", "promo"))
            .await
            .expect_err("duplicate link");
        assert_eq!(err, UserShortLinkRepositoryError::duplicate("1"));
    }

    #[rstest]
    #[tokio::test]
    async fn owner_lookup_uses_directory_details() {
        let store = InMemoryUserShortLinkRepository::new();
        let alpha = User::try_from_id("alpha")
            .expect("valid id")
            .with_email("alpha@example.com");
        store.register_user(alpha.clone()).expect("register");
        store
            .create_relation(alpha.id(), &input("1", "promo"))
            .await
            .expect("relation");

        let owner = store
            .find_user_by_short_link(&ShortLinkId::new("1").expect("valid id"))
            .await
            .expect("lookup");
        assert_eq!(owner, Some(alpha));
    }
}
