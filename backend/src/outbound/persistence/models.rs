//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer. Conversion to domain
//! values happens in the repositories, which validate each row.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{feature_toggles, short_links, user_roles, user_short_links};

/// Insertable role assignment.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_roles)]
pub(crate) struct NewUserRoleRow<'a> {
    pub user_id: &'a str,
    pub role: &'a str,
}

/// Row read from `feature_toggles`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = feature_toggles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FeatureToggleRow {
    pub id: String,
    pub is_enabled: bool,
    pub toggle_type: String,
}

/// Insertable toggle, also used as the upsert changeset.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = feature_toggles)]
pub(crate) struct NewFeatureToggleRow<'a> {
    pub id: &'a str,
    pub is_enabled: bool,
    pub toggle_type: &'a str,
}

/// Row read from `short_links`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = short_links)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ShortLinkRow {
    pub id: String,
    pub alias: String,
    pub long_link: String,
    pub created_at: DateTime<Utc>,
    pub expire_at: Option<DateTime<Utc>>,
}

/// Insertable ownership row. `created_at` defaults to `now()`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_short_links)]
pub(crate) struct NewUserShortLinkRow<'a> {
    pub short_link_id: &'a str,
    pub user_id: &'a str,
    pub alias: &'a str,
}
