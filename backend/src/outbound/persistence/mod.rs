//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories only translate between Diesel rows and domain values; no
//! authorization logic lives here. Row structs (`models.rs`) and table
//! definitions (`schema.rs`) stay private to this module. Connections come
//! from a `bb8` pool driven by `diesel-async`.
//!
//! ```ignore
//! use shortlink_core::outbound::persistence::{DbPool, DieselUserRoleRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/shortlink")).await?;
//! let roles = DieselUserRoleRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_feature_toggle_repository;
mod diesel_short_link_repository;
mod diesel_user_role_repository;
mod diesel_user_short_link_repository;
mod models;
mod pool;
mod schema;

pub use diesel_feature_toggle_repository::DieselFeatureToggleRepository;
pub use diesel_short_link_repository::DieselShortLinkRepository;
pub use diesel_user_role_repository::DieselUserRoleRepository;
pub use diesel_user_short_link_repository::DieselUserShortLinkRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
