//! Selects the decision maker for a deployment.

use std::sync::Arc;

use tracing::info;

use crate::domain::Deployment;
use crate::domain::ports::{Authorizer, DecisionMaker, FeatureToggleRepository, Instrumentation};

use super::{DynamicDecisionMaker, FeaturePermissionTable, StaticDecisionMaker};

/// Builds the decision maker matching the deployment.
///
/// Development deployments get a [`StaticDecisionMaker`] and never touch
/// toggle storage. Every other deployment gets a [`DynamicDecisionMaker`].
/// The choice is made once here; callers only see [`DecisionMaker`].
#[derive(Clone)]
pub struct DecisionMakerFactory {
    deployment: Deployment,
    authorizer: Arc<dyn Authorizer>,
    toggles: Arc<dyn FeatureToggleRepository>,
    features: Arc<FeaturePermissionTable>,
}

impl DecisionMakerFactory {
    /// Create a factory for `deployment`.
    pub fn new(
        deployment: Deployment,
        authorizer: Arc<dyn Authorizer>,
        toggles: Arc<dyn FeatureToggleRepository>,
        features: Arc<FeaturePermissionTable>,
    ) -> Self {
        Self {
            deployment,
            authorizer,
            toggles,
            features,
        }
    }

    /// Deployment this factory was built for.
    pub fn deployment(&self) -> Deployment {
        self.deployment
    }

    /// Build a decision maker reporting to `instrumentation`.
    pub fn new_decision_maker(
        &self,
        instrumentation: Arc<dyn Instrumentation>,
    ) -> Arc<dyn DecisionMaker> {
        info!(deployment = %self.deployment, "selecting feature decision maker");
        if self.deployment.is_development() {
            Arc::new(StaticDecisionMaker::new(
                Arc::clone(&self.authorizer),
                Arc::clone(&self.features),
                instrumentation,
            ))
        } else {
            Arc::new(DynamicDecisionMaker::new(
                Arc::clone(&self.toggles),
                Arc::clone(&self.authorizer),
                Arc::clone(&self.features),
                instrumentation,
            ))
        }
    }
}
