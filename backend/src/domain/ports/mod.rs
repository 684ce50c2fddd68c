//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Storage ports expose typed error enums so adapters map their failures
//! into predictable variants. Driving ports (`Authorizer`, `DecisionMaker`,
//! `Authenticator`) speak the domain [`Error`](crate::domain::Error).

mod macros;
pub(crate) use macros::define_port_error;

mod authenticator;
mod authorizer;
mod decision_maker;
mod feature_toggle_repository;
mod instrumentation;
mod short_link_repository;
mod user_role_repository;
mod user_short_link_repository;

#[cfg(test)]
pub use authenticator::MockAuthenticator;
pub use authenticator::{AuthToken, Authenticator, INVALID_AUTH_TOKEN};
#[cfg(test)]
pub use authorizer::MockAuthorizer;
pub use authorizer::Authorizer;
pub use decision_maker::DecisionMaker;
#[cfg(test)]
pub use feature_toggle_repository::MockFeatureToggleRepository;
pub use feature_toggle_repository::{
    FeatureToggleRepository, FeatureToggleRepositoryError, FixtureFeatureToggleRepository,
};
#[cfg(test)]
pub use instrumentation::MockInstrumentation;
pub use instrumentation::{Instrumentation, InstrumentationEvent, NoOpInstrumentation};
#[cfg(test)]
pub use short_link_repository::MockShortLinkRepository;
pub use short_link_repository::{
    FixtureShortLinkRepository, ShortLinkRepository, ShortLinkRepositoryError,
};
#[cfg(test)]
pub use user_role_repository::MockUserRoleRepository;
pub use user_role_repository::{
    FixtureUserRoleRepository, RoleSet, UserRoleRepository, UserRoleRepositoryError,
};
#[cfg(test)]
pub use user_short_link_repository::MockUserShortLinkRepository;
pub use user_short_link_repository::{UserShortLinkRepository, UserShortLinkRepositoryError};
