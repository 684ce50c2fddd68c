//! Driving port for feature eligibility.

use async_trait::async_trait;

use crate::domain::feature::FeatureId;
use crate::domain::{Error, User};

/// Answers whether a feature is enabled for a user.
///
/// `user` is `None` for anonymous callers. Implementations are chosen once
/// per deployment by the decision maker factory.
#[async_trait]
pub trait DecisionMaker: Send + Sync {
    /// Whether `feature` is on for `user`.
    async fn is_feature_enabled(
        &self,
        feature: &FeatureId,
        user: Option<&User>,
    ) -> Result<bool, Error>;
}
