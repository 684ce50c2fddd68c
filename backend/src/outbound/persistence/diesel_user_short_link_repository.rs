//! PostgreSQL-backed `UserShortLinkRepository`.
//!
//! `user_short_links.short_link_id` is the primary key, so the database
//! rejects a second owner for the same link. Forward lookups are ordered by
//! insertion time.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserShortLinkRepository, UserShortLinkRepositoryError};
use crate::domain::{Alias, ShortLinkId, ShortLinkInput, User, UserId};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::NewUserShortLinkRow;
use super::pool::{DbPool, PoolError};
use super::schema::{user_short_links, users};

/// Diesel implementation of the ownership relation.
#[derive(Clone)]
pub struct DieselUserShortLinkRepository {
    pool: DbPool,
}

impl DieselUserShortLinkRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserShortLinkRepositoryError {
    map_basic_pool_error(error, |message| {
        UserShortLinkRepositoryError::Connection { message }
    })
}

fn map_diesel_error(error: diesel::result::Error) -> UserShortLinkRepositoryError {
    map_basic_diesel_error(
        error,
        UserShortLinkRepositoryError::query,
        UserShortLinkRepositoryError::connection,
    )
}

fn owner_from_columns(
    user_id: String,
    email: Option<String>,
    name: Option<String>,
) -> Result<User, UserShortLinkRepositoryError> {
    let user_id = UserId::new(user_id.as_str()).map_err(|err| {
        UserShortLinkRepositoryError::query(format!("stored owner id {user_id:?}: {err}"))
    })?;
    let mut user = User::new(user_id);
    if let Some(email) = email {
        user = user.with_email(email);
    }
    if let Some(name) = name {
        user = user.with_name(name);
    }
    Ok(user)
}

#[async_trait]
impl UserShortLinkRepository for DieselUserShortLinkRepository {
    async fn create_relation(
        &self,
        user_id: &UserId,
        link: &ShortLinkInput,
    ) -> Result<(), UserShortLinkRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewUserShortLinkRow {
            short_link_id: link.id.as_str(),
            user_id: user_id.as_ref(),
            alias: link.alias.as_str(),
        };
        diesel::insert_into(user_short_links::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                if is_unique_violation(&err) {
                    UserShortLinkRepositoryError::duplicate(link.id.as_str())
                } else {
                    map_diesel_error(err)
                }
            })
    }

    async fn find_user_by_short_link(
        &self,
        short_link_id: &ShortLinkId,
    ) -> Result<Option<User>, UserShortLinkRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<(String, Option<String>, Option<String>)> = user_short_links::table
            .left_join(users::table)
            .filter(user_short_links::short_link_id.eq(short_link_id.as_str()))
            .select((
                user_short_links::user_id,
                users::email.nullable(),
                users::name.nullable(),
            ))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(|(user_id, email, name)| owner_from_columns(user_id, email, name))
            .transpose()
    }

    async fn find_aliases_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Alias>, UserShortLinkRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let names: Vec<String> = user_short_links::table
            .filter(user_short_links::user_id.eq(user_id.as_ref()))
            .order((
                user_short_links::created_at.asc(),
                user_short_links::short_link_id.asc(),
            ))
            .select(user_short_links::alias)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        names
            .into_iter()
            .map(|name| {
                Alias::new(name.as_str()).map_err(|err| {
                    UserShortLinkRepositoryError::query(format!("stored alias {name:?}: {err}"))
                })
            })
            .collect()
    }

    async fn find_short_link_ids_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<ShortLinkId>, UserShortLinkRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let ids: Vec<String> = user_short_links::table
            .filter(user_short_links::user_id.eq(user_id.as_ref()))
            .order((
                user_short_links::created_at.asc(),
                user_short_links::short_link_id.asc(),
            ))
            .select(user_short_links::short_link_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        ids.into_iter()
            .map(|id| {
                ShortLinkId::new(id.as_str()).map_err(|err| {
                    UserShortLinkRepositoryError::query(format!("stored short link id {id:?}: {err}"))
                })
            })
            .collect()
    }

    async fn has_mapping(
        &self,
        user_id: &UserId,
        alias: &Alias,
    ) -> Result<bool, UserShortLinkRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(
            user_short_links::table
                .filter(user_short_links::user_id.eq(user_id.as_ref()))
                .filter(user_short_links::alias.eq(alias.as_str())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }
}
