//! User identity as seen by the authorization core.
//!
//! Users are owned by the authentication subsystem. This core only references
//! them: identifiers are compared, never rewritten.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum accepted length for a user identifier.
pub const USER_ID_MAX: usize = 128;

/// Validation errors returned when constructing user values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    PaddedId,
    IdTooLong { max: usize },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::PaddedId => write!(f, "user id must not carry surrounding whitespace"),
            Self::IdTooLong { max } => write!(f, "user id must be at most {max} characters"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier issued by the authentication subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::PaddedId);
        }
        if id.chars().count() > USER_ID_MAX {
            return Err(UserValidationError::IdTooLong { max: USER_ID_MAX });
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Authenticated user.
///
/// ## Invariants
/// - `id` is non-empty and free of surrounding whitespace.
/// - `email` and `name` are carried through verbatim from the authentication
///   subsystem; this core never validates or mutates them.
///
/// # Examples
/// ```
/// use shortlink_core::domain::User;
///
/// let user = User::try_from_id("alpha").unwrap().with_email("alpha@example.com");
/// assert_eq!(user.id().as_ref(), "alpha");
/// assert_eq!(user.email(), Some("alpha@example.com"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl User {
    /// Build a user carrying only its identifier.
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            email: None,
            name: None,
        }
    }

    /// Fallible constructor from a raw identifier.
    pub fn try_from_id(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        UserId::new(id).map(Self::new)
    }

    /// Attach the email address reported by the authentication subsystem.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Attach the display name reported by the authentication subsystem.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Email address, when known.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Display name, when known.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", UserValidationError::EmptyId)]
    #[case(" alpha", UserValidationError::PaddedId)]
    #[case("alpha\n", UserValidationError::PaddedId)]
    fn user_id_rejects_malformed_input(#[case] raw: &str, #[case] expected: UserValidationError) {
        assert_eq!(UserId::new(raw), Err(expected));
    }

    #[rstest]
    fn user_id_rejects_overlong_input() {
        let raw = "a".repeat(USER_ID_MAX + 1);
        assert_eq!(
            UserId::new(raw),
            Err(UserValidationError::IdTooLong { max: USER_ID_MAX })
        );
    }

    #[rstest]
    fn user_serialises_without_absent_fields() {
        let user = User::try_from_id("alpha").expect("valid id").with_name("Alpha");
        let value = serde_json::to_value(&user).expect("serialise user");
        assert_eq!(value, serde_json::json!({ "id": "alpha", "name": "Alpha" }));
    }

    #[rstest]
    fn user_deserialisation_validates_identifier() {
        let result = serde_json::from_value::<User>(serde_json::json!({ "id": "" }));
        assert!(result.is_err());
    }
}
