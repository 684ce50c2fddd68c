//! PostgreSQL-backed `ShortLinkRepository`.
//!
//! Rows are validated on the way out; a row that fails validation surfaces
//! as [`ShortLinkRepositoryError::InvalidRecord`] rather than being skipped.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ShortLinkRepository, ShortLinkRepositoryError};
use crate::domain::{
    Alias, LongLink, ShortLink, ShortLinkDraft, ShortLinkId, ShortLinkValidationError,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::ShortLinkRow;
use super::pool::{DbPool, PoolError};
use super::schema::short_links;

/// Diesel implementation of the short link lookups.
#[derive(Clone)]
pub struct DieselShortLinkRepository {
    pool: DbPool,
}

impl DieselShortLinkRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ShortLinkRepositoryError {
    map_basic_pool_error(error, |message| ShortLinkRepositoryError::Connection { message })
}

fn map_diesel_error(error: diesel::result::Error) -> ShortLinkRepositoryError {
    map_basic_diesel_error(
        error,
        ShortLinkRepositoryError::query,
        ShortLinkRepositoryError::connection,
    )
}

fn row_to_short_link(row: ShortLinkRow) -> Result<ShortLink, ShortLinkRepositoryError> {
    let invalid =
        |err: ShortLinkValidationError| ShortLinkRepositoryError::invalid_record(&row.id, err.to_string());
    let draft = ShortLinkDraft {
        id: ShortLinkId::new(row.id.as_str()).map_err(invalid)?,
        alias: Alias::new(row.alias.as_str()).map_err(invalid)?,
        long_link: LongLink::parse(&row.long_link).map_err(invalid)?,
        created_at: row.created_at,
        expire_at: row.expire_at,
    };
    ShortLink::new(draft).map_err(invalid)
}

fn rows_to_short_links(rows: Vec<ShortLinkRow>) -> Result<Vec<ShortLink>, ShortLinkRepositoryError> {
    rows.into_iter().map(row_to_short_link).collect()
}

#[async_trait]
impl ShortLinkRepository for DieselShortLinkRepository {
    async fn find_by_id(
        &self,
        id: &ShortLinkId,
    ) -> Result<Option<ShortLink>, ShortLinkRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ShortLinkRow> = short_links::table
            .find(id.as_str())
            .select(ShortLinkRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_short_link).transpose()
    }

    async fn find_by_alias(&self, alias: &Alias) -> Result<Vec<ShortLink>, ShortLinkRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ShortLinkRow> = short_links::table
            .filter(short_links::alias.eq(alias.as_str()))
            .select(ShortLinkRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_short_links(rows)
    }

    async fn find_by_ids(
        &self,
        ids: &[ShortLinkId],
    ) -> Result<Vec<ShortLink>, ShortLinkRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let keys: Vec<&str> = ids.iter().map(ShortLinkId::as_str).collect();
        let rows: Vec<ShortLinkRow> = short_links::table
            .filter(short_links::id.eq_any(keys))
            .select(ShortLinkRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_short_links(rows)
    }
}
