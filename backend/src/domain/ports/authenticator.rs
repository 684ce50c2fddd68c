//! Driving port that turns an auth token into a user.
//!
//! Token issuance and verification live outside this crate. The core only
//! consumes the pass/fail contract: a failed resolution surfaces as
//! [`ErrorCode::Unauthorized`](crate::domain::ErrorCode::Unauthorized),
//! never as a denied permission.

use std::fmt;

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::{Error, User};

/// Message attached to every failed token resolution.
pub const INVALID_AUTH_TOKEN: &str = "invalid auth token";

/// Opaque bearer token. The backing buffer is wiped on drop.
#[derive(Clone)]
pub struct AuthToken(Zeroizing<String>);

impl AuthToken {
    /// Wrap a raw token; `None` when it is blank.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = Zeroizing::new(raw.into());
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    /// Expose the raw token to a verifier.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

/// Resolves the acting user from a token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Resolve `token` to a user or fail with an unauthorized error.
    async fn resolve_user(&self, token: &AuthToken) -> Result<User, Error>;
}
