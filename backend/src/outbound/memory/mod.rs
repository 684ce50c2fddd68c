//! In-process adapters for every storage port.
//!
//! These back the behaviour tests and local tooling. They enforce the same
//! uniqueness rules as the PostgreSQL adapters.

mod authenticator;
mod relation_store;
mod role_store;
mod short_link_store;
mod toggle_store;

pub use authenticator::StaticTokenAuthenticator;
pub use relation_store::InMemoryUserShortLinkRepository;
pub use role_store::InMemoryUserRoleRepository;
pub use short_link_store::InMemoryShortLinkRepository;
pub use toggle_store::InMemoryFeatureToggleRepository;
