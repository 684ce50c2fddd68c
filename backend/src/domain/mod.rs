//! Domain primitives, services, and ports.
//!
//! Purpose: decide whether a user may act (RBAC), whether a feature is on
//! for a user, which short link an alias resolves to at a point in time, and
//! who owns a short link. Storage, transport, and token verification are
//! reached only through [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User / UserId: identities referenced, never mutated, by this core.
//! - ShortLink and its value types: records resolved by [`ShortLinkRetriever`].
//! - [`rbac`]: roles, permissions, the static table, and [`rbac::RbacAuthorizer`].
//! - [`feature`]: toggles and the static/dynamic decision makers.
//! - [`LinkQuery`]: authenticated facade used by transport adapters.

pub mod deployment;
pub mod error;
pub mod feature;
pub mod link_query;
pub mod ownership_service;
pub mod ports;
pub mod rbac;
pub mod short_link;
pub mod short_link_retriever;
pub mod user;

pub use self::deployment::{Deployment, ParseDeploymentError};
pub use self::error::{Error, ErrorCode};
pub use self::link_query::LinkQuery;
pub use self::ownership_service::OwnershipService;
pub use self::short_link::{
    ALIAS_MAX, Alias, LongLink, ShortLink, ShortLinkDraft, ShortLinkId, ShortLinkInput,
    ShortLinkValidationError,
};
pub use self::short_link_retriever::ShortLinkRetriever;
pub use self::user::{USER_ID_MAX, User, UserId, UserValidationError};

/// Convenient domain result alias.
///
/// # Examples
/// ```
/// use shortlink_core::domain::{DomainResult, Error};
///
/// fn lookup() -> DomainResult<u32> {
///     Err(Error::not_found("nope"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type DomainResult<T> = Result<T, Error>;
