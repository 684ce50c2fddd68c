//! In-process feature toggle store.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::feature::{FeatureId, FeatureToggle};
use crate::domain::ports::{FeatureToggleRepository, FeatureToggleRepositoryError};

/// Toggles held in a mutex-guarded map.
#[derive(Debug, Default)]
pub struct InMemoryFeatureToggleRepository {
    toggles: Mutex<HashMap<FeatureId, FeatureToggle>>,
}

impl InMemoryFeatureToggleRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(
        &self,
    ) -> Result<
        std::sync::MutexGuard<'_, HashMap<FeatureId, FeatureToggle>>,
        FeatureToggleRepositoryError,
    > {
        self.toggles
            .lock()
            .map_err(|_| FeatureToggleRepositoryError::query("toggle store lock poisoned"))
    }
}

#[async_trait]
impl FeatureToggleRepository for InMemoryFeatureToggleRepository {
    async fn find_toggle(
        &self,
        feature: &FeatureId,
    ) -> Result<Option<FeatureToggle>, FeatureToggleRepositoryError> {
        Ok(self.lock()?.get(feature).cloned())
    }

    async fn save_toggle(&self, toggle: &FeatureToggle) -> Result<(), FeatureToggleRepositoryError> {
        self.lock()?.insert(toggle.id.clone(), toggle.clone());
        Ok(())
    }

    async fn set_enabled(
        &self,
        feature: &FeatureId,
        enabled: bool,
    ) -> Result<Option<FeatureToggle>, FeatureToggleRepositoryError> {
        let mut guard = self.lock()?;
        Ok(guard.get_mut(feature).map(|toggle| {
            toggle.is_enabled = enabled;
            toggle.clone()
        }))
    }
}
