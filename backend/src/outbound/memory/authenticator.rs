//! Token table authenticator for tests and local tooling.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::ports::{AuthToken, Authenticator, INVALID_AUTH_TOKEN};
use crate::domain::{Error, User};

/// Resolves tokens from a fixed table. Unknown tokens are unauthorized.
#[derive(Debug, Default, Clone)]
pub struct StaticTokenAuthenticator {
    tokens: HashMap<String, User>,
}

impl StaticTokenAuthenticator {
    /// Create an authenticator with no known tokens.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `token` as `user`.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>, user: User) -> Self {
        self.tokens.insert(token.into(), user);
        self
    }
}

#[async_trait]
impl Authenticator for StaticTokenAuthenticator {
    async fn resolve_user(&self, token: &AuthToken) -> Result<User, Error> {
        self.tokens
            .get(token.expose())
            .cloned()
            .ok_or_else(|| Error::unauthorized(INVALID_AUTH_TOKEN))
    }
}
