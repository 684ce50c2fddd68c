//! Tracking sink for authorization and feature evaluation events.
//!
//! Events are informational. Recording never fails and never changes the
//! outcome of an evaluation.

use crate::domain::UserId;
use crate::domain::feature::FeatureId;
use crate::domain::rbac::Permission;

/// Named event emitted by the decision makers and the authorizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstrumentationEvent {
    /// A toggle lookup finished.
    FeatureToggleRetrieved {
        /// Feature looked up.
        feature: FeatureId,
        /// Whether a toggle row existed.
        found: bool,
    },
    /// A feature decision was reached.
    FeatureEvaluated {
        /// Feature evaluated.
        feature: FeatureId,
        /// Acting user, `None` when anonymous.
        user_id: Option<UserId>,
        /// Outcome.
        enabled: bool,
    },
    /// A permission check was answered.
    PermissionChecked {
        /// User checked.
        user_id: UserId,
        /// Permission requested.
        permission: Permission,
        /// Outcome.
        granted: bool,
    },
}

impl InstrumentationEvent {
    /// Stable event name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::FeatureToggleRetrieved { .. } => "FeatureToggleRetrieved",
            Self::FeatureEvaluated { .. } => "FeatureEvaluated",
            Self::PermissionChecked { .. } => "PermissionChecked",
        }
    }
}

/// Sink accepting named events.
#[cfg_attr(test, mockall::automock)]
pub trait Instrumentation: Send + Sync {
    /// Record `event`.
    fn record(&self, event: &InstrumentationEvent);
}

/// Sink that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpInstrumentation;

impl Instrumentation for NoOpInstrumentation {
    fn record(&self, _event: &InstrumentationEvent) {}
}
