//! Deployment settings loaded via OrthoConfig.
//!
//! Values come from `SHORTLINK_*` environment variables or a configuration
//! file. The deployment name is validated on access; an unknown name is an
//! error rather than a fallback to production.

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{Deployment, ParseDeploymentError};

const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Configuration for the authorization core and its storage.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SHORTLINK")]
pub struct ShortlinkSettings {
    /// Deployment name: `development`, `staging` or `production`.
    pub deployment: Option<String>,
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Maximum number of pooled connections.
    pub pool_max_size: Option<u32>,
}

impl ShortlinkSettings {
    /// Configured deployment, defaulting to production when unset.
    pub fn deployment(&self) -> Result<Deployment, ParseDeploymentError> {
        self.deployment
            .as_deref()
            .map_or(Ok(Deployment::default()), |name| name.parse())
    }

    /// Configured database URL, if any.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    /// Configured pool size, falling back to the default.
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }
}
