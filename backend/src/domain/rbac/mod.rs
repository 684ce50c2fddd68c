//! Role-based access control.
//!
//! Permissions are granted transitively through roles. A user with no roles
//! holds no permissions; a user holding several roles holds the union of
//! their permissions.

mod authorizer;
mod permission;
mod permission_table;
mod role;

pub use authorizer::RbacAuthorizer;
pub use permission::{ParsePermissionError, Permission};
pub use permission_table::{PermissionTable, UnmappedRole};
pub use role::{ParseRoleError, Role};
