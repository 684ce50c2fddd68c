//! PostgreSQL-backed `FeatureToggleRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::feature::{FeatureId, FeatureToggle, ToggleType};
use crate::domain::ports::{FeatureToggleRepository, FeatureToggleRepositoryError};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{FeatureToggleRow, NewFeatureToggleRow};
use super::pool::{DbPool, PoolError};
use super::schema::feature_toggles;

/// Diesel implementation of the toggle store.
#[derive(Clone)]
pub struct DieselFeatureToggleRepository {
    pool: DbPool,
}

impl DieselFeatureToggleRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> FeatureToggleRepositoryError {
    map_basic_pool_error(error, |message| {
        FeatureToggleRepositoryError::Connection { message }
    })
}

fn map_diesel_error(error: diesel::result::Error) -> FeatureToggleRepositoryError {
    map_basic_diesel_error(
        error,
        FeatureToggleRepositoryError::query,
        FeatureToggleRepositoryError::connection,
    )
}

fn row_to_toggle(row: FeatureToggleRow) -> Result<FeatureToggle, FeatureToggleRepositoryError> {
    let toggle_type = row.toggle_type.parse::<ToggleType>().map_err(|err| {
        FeatureToggleRepositoryError::query(format!("toggle {}: {err}", row.id))
    })?;
    let id = FeatureId::new(row.id.as_str())
        .map_err(|err| FeatureToggleRepositoryError::query(format!("toggle {}: {err}", row.id)))?;
    Ok(FeatureToggle {
        id,
        is_enabled: row.is_enabled,
        toggle_type,
    })
}

#[async_trait]
impl FeatureToggleRepository for DieselFeatureToggleRepository {
    async fn find_toggle(
        &self,
        feature: &FeatureId,
    ) -> Result<Option<FeatureToggle>, FeatureToggleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<FeatureToggleRow> = feature_toggles::table
            .find(feature.as_str())
            .select(FeatureToggleRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_toggle).transpose()
    }

    async fn save_toggle(&self, toggle: &FeatureToggle) -> Result<(), FeatureToggleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewFeatureToggleRow {
            id: toggle.id.as_str(),
            is_enabled: toggle.is_enabled,
            toggle_type: toggle.toggle_type.as_str(),
        };
        diesel::insert_into(feature_toggles::table)
            .values(&row)
            .on_conflict(feature_toggles::id)
            .do_update()
            .set((
                feature_toggles::is_enabled.eq(excluded(feature_toggles::is_enabled)),
                feature_toggles::toggle_type.eq(excluded(feature_toggles::toggle_type)),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn set_enabled(
        &self,
        feature: &FeatureId,
        enabled: bool,
    ) -> Result<Option<FeatureToggle>, FeatureToggleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<FeatureToggleRow> =
            diesel::update(feature_toggles::table.find(feature.as_str()))
                .set(feature_toggles::is_enabled.eq(enabled))
                .returning(FeatureToggleRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?;

        row.map(row_to_toggle).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn valid_row_converts() {
        let toggle = row_to_toggle(FeatureToggleRow {
            id: "change-log".to_owned(),
            is_enabled: true,
            toggle_type: "permission".to_owned(),
        })
        .expect("valid row");
        assert_eq!(toggle.toggle_type, ToggleType::Permission);
        assert!(toggle.is_enabled);
    }

    #[rstest]
    #[case("change-log", "rollout")]
    #[case("Change Log", "manual")]
    fn malformed_row_is_a_query_error(#[case] id: &str, #[case] toggle_type: &str) {
        let err = row_to_toggle(FeatureToggleRow {
            id: id.to_owned(),
            is_enabled: false,
            toggle_type: toggle_type.to_owned(),
        })
        .expect_err("malformed row");
        assert!(matches!(err, FeatureToggleRepositoryError::Query { .. }));
    }
}
