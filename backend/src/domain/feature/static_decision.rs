//! Decision maker that never reads toggle storage.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{Authorizer, DecisionMaker, Instrumentation, InstrumentationEvent};
use crate::domain::{Error, User};

use super::{FeatureId, FeaturePermissionTable, user_holds};

/// Gates each feature purely on the permission associated with it.
///
/// A feature with no associated permission is on for everyone.
#[derive(Clone)]
pub struct StaticDecisionMaker {
    authorizer: Arc<dyn Authorizer>,
    features: Arc<FeaturePermissionTable>,
    instrumentation: Arc<dyn Instrumentation>,
}

impl StaticDecisionMaker {
    /// Create a static decision maker.
    pub fn new(
        authorizer: Arc<dyn Authorizer>,
        features: Arc<FeaturePermissionTable>,
        instrumentation: Arc<dyn Instrumentation>,
    ) -> Self {
        Self {
            authorizer,
            features,
            instrumentation,
        }
    }
}

#[async_trait]
impl DecisionMaker for StaticDecisionMaker {
    async fn is_feature_enabled(
        &self,
        feature: &FeatureId,
        user: Option<&User>,
    ) -> Result<bool, Error> {
        let enabled = match self.features.permission_for(feature) {
            None => true,
            Some(permission) => user_holds(self.authorizer.as_ref(), user, permission).await?,
        };

        debug!(%feature, enabled, mode = "static", "feature evaluated");
        self.instrumentation
            .record(&InstrumentationEvent::FeatureEvaluated {
                feature: feature.clone(),
                user_id: user.map(|u| u.id().clone()),
                enabled,
            });
        Ok(enabled)
    }
}
