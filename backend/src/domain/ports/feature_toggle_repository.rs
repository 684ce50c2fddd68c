//! Port for persisted feature toggles.

use async_trait::async_trait;

use crate::domain::feature::{FeatureId, FeatureToggle};

use super::define_port_error;

define_port_error! {
    /// Errors raised by feature toggle adapters.
    pub enum FeatureToggleRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "feature toggle repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "feature toggle repository query failed: {message}",
    }
}

/// Toggle storage read by the dynamic decision maker and written by operators.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeatureToggleRepository: Send + Sync {
    /// Fetch the toggle for `feature`; `None` when it was never created.
    async fn find_toggle(
        &self,
        feature: &FeatureId,
    ) -> Result<Option<FeatureToggle>, FeatureToggleRepositoryError>;

    /// Insert or replace a toggle.
    async fn save_toggle(&self, toggle: &FeatureToggle) -> Result<(), FeatureToggleRepositoryError>;

    /// Flip an existing toggle, returning the updated record or `None` when
    /// the toggle does not exist.
    async fn set_enabled(
        &self,
        feature: &FeatureId,
        enabled: bool,
    ) -> Result<Option<FeatureToggle>, FeatureToggleRepositoryError>;
}

/// Fixture store holding no toggles.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFeatureToggleRepository;

#[async_trait]
impl FeatureToggleRepository for FixtureFeatureToggleRepository {
    async fn find_toggle(
        &self,
        _feature: &FeatureId,
    ) -> Result<Option<FeatureToggle>, FeatureToggleRepositoryError> {
        Ok(None)
    }

    async fn save_toggle(
        &self,
        _toggle: &FeatureToggle,
    ) -> Result<(), FeatureToggleRepositoryError> {
        Ok(())
    }

    async fn set_enabled(
        &self,
        _feature: &FeatureId,
        _enabled: bool,
    ) -> Result<Option<FeatureToggle>, FeatureToggleRepositoryError> {
        Ok(None)
    }
}
