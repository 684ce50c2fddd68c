//! Driving port for permission checks.

use async_trait::async_trait;

use crate::domain::rbac::Permission;
use crate::domain::{Error, UserId};

/// Answers whether a user holds a permission.
///
/// A missing permission is `Ok(false)`. Errors are reserved for storage
/// faults and role lookup faults.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authorizer: Send + Sync {
    /// Whether `user_id` holds `permission` through any of its roles.
    async fn has_permission(&self, user_id: &UserId, permission: Permission)
    -> Result<bool, Error>;
}
