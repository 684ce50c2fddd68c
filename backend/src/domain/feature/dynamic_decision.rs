//! Decision maker driven by persisted toggles.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    Authorizer, DecisionMaker, FeatureToggleRepository, FeatureToggleRepositoryError,
    Instrumentation, InstrumentationEvent,
};
use crate::domain::{Error, User};

use super::{FeatureId, FeaturePermissionTable, FeatureToggle, ToggleType, user_holds};

/// Reads the toggle for each feature, then composes with the authorizer for
/// permission-typed toggles.
///
/// | toggle                       | result                         |
/// |------------------------------|--------------------------------|
/// | missing                      | off                            |
/// | disabled                     | off                            |
/// | enabled, `Manual`            | on                             |
/// | enabled, `Permission`        | on iff the user holds it       |
/// | enabled, `Permission`, unmapped feature | off                 |
#[derive(Clone)]
pub struct DynamicDecisionMaker {
    toggles: Arc<dyn FeatureToggleRepository>,
    authorizer: Arc<dyn Authorizer>,
    features: Arc<FeaturePermissionTable>,
    instrumentation: Arc<dyn Instrumentation>,
}

impl DynamicDecisionMaker {
    /// Create a dynamic decision maker.
    pub fn new(
        toggles: Arc<dyn FeatureToggleRepository>,
        authorizer: Arc<dyn Authorizer>,
        features: Arc<FeaturePermissionTable>,
        instrumentation: Arc<dyn Instrumentation>,
    ) -> Self {
        Self {
            toggles,
            authorizer,
            features,
            instrumentation,
        }
    }

    fn map_toggle_error(error: FeatureToggleRepositoryError) -> Error {
        match error {
            FeatureToggleRepositoryError::Connection { message } => Error::service_unavailable(
                format!("feature toggle repository unavailable: {message}"),
            ),
            FeatureToggleRepositoryError::Query { message } => {
                Error::internal(format!("feature toggle repository error: {message}"))
            }
        }
    }

    async fn evaluate(
        &self,
        feature: &FeatureId,
        toggle: Option<FeatureToggle>,
        user: Option<&User>,
    ) -> Result<bool, Error> {
        let Some(toggle) = toggle.filter(|toggle| toggle.is_enabled) else {
            return Ok(false);
        };
        match toggle.toggle_type {
            ToggleType::Manual => Ok(true),
            ToggleType::Permission => match self.features.permission_for(feature) {
                Some(permission) => user_holds(self.authorizer.as_ref(), user, permission).await,
                None => Ok(false),
            },
        }
    }
}

#[async_trait]
impl DecisionMaker for DynamicDecisionMaker {
    async fn is_feature_enabled(
        &self,
        feature: &FeatureId,
        user: Option<&User>,
    ) -> Result<bool, Error> {
        let toggle = self
            .toggles
            .find_toggle(feature)
            .await
            .map_err(Self::map_toggle_error)?;
        self.instrumentation
            .record(&InstrumentationEvent::FeatureToggleRetrieved {
                feature: feature.clone(),
                found: toggle.is_some(),
            });

        let enabled = self.evaluate(feature, toggle, user).await?;

        debug!(%feature, enabled, mode = "dynamic", "feature evaluated");
        self.instrumentation
            .record(&InstrumentationEvent::FeatureEvaluated {
                feature: feature.clone(),
                user_id: user.map(|u| u.id().clone()),
                enabled,
            });
        Ok(enabled)
    }
}
