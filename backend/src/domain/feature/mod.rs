//! Feature eligibility.
//!
//! A decision maker answers whether a feature is on for a user. Two variants
//! exist and the factory picks one per deployment.

mod dynamic_decision;
mod factory;
mod static_decision;
mod toggle;

pub use dynamic_decision::DynamicDecisionMaker;
pub use factory::DecisionMakerFactory;
pub use static_decision::StaticDecisionMaker;
pub use toggle::{
    FEATURE_ID_MAX, FeatureId, FeatureIdValidationError, FeaturePermissionTable, FeatureToggle,
    ParseToggleTypeError, ToggleType,
};

use crate::domain::ports::Authorizer;
use crate::domain::rbac::Permission;
use crate::domain::{Error, User};

/// Anonymous callers never hold a permission.
async fn user_holds(
    authorizer: &dyn Authorizer,
    user: Option<&User>,
    permission: Permission,
) -> Result<bool, Error> {
    match user {
        Some(user) => authorizer.has_permission(user.id(), permission).await,
        None => Ok(false),
    }
}
