//! Short link records and their identifiers.
//!
//! A short link is created elsewhere and only read here. It is active at any
//! instant up to and including `expire_at`; without an expiry it never lapses.
//! `created_at` only orders variants that share an alias.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// Maximum accepted alias length.
pub const ALIAS_MAX: usize = 64;

/// Validation failures for short link values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShortLinkValidationError {
    /// Short link ID was empty or padded with whitespace.
    #[error("short link id must be non-empty and trimmed")]
    InvalidId,
    /// Alias was empty.
    #[error("alias must not be empty")]
    EmptyAlias,
    /// Alias contained characters that cannot appear in a URL path segment.
    #[error("alias may only contain ASCII letters, digits, '-' and '_'")]
    InvalidAliasCharacter,
    /// Alias exceeded [`ALIAS_MAX`].
    #[error("alias must be at most {max} characters")]
    AliasTooLong {
        /// Upper bound that was exceeded.
        max: usize,
    },
    /// Target was not an absolute URL.
    #[error("long link is not a valid absolute URL: {reason}")]
    InvalidLongLink {
        /// Parser diagnostic.
        reason: String,
    },
    /// Expiry precedes creation.
    #[error("short link expires before it is created")]
    ExpiresBeforeCreation,
}

/// Internal primary identifier of a short link.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShortLinkId(String);

impl ShortLinkId {
    /// Validate and construct a short link ID.
    pub fn new(value: impl Into<String>) -> Result<Self, ShortLinkValidationError> {
        let value = value.into();
        if value.is_empty() || value.trim() != value {
            return Err(ShortLinkValidationError::InvalidId);
        }
        Ok(Self(value))
    }

    /// Borrow the identifier.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ShortLinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ShortLinkId> for String {
    fn from(value: ShortLinkId) -> Self {
        value.0
    }
}

impl TryFrom<String> for ShortLinkId {
    type Error = ShortLinkValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Human-readable key used in the short URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Alias(String);

impl Alias {
    /// Validate and construct an alias.
    ///
    /// # Examples
    /// ```
    /// use shortlink_core::domain::Alias;
    ///
    /// assert!(Alias::new("docs_2024").is_ok());
    /// assert!(Alias::new("docs/2024").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, ShortLinkValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ShortLinkValidationError::EmptyAlias);
        }
        if value.len() > ALIAS_MAX {
            return Err(ShortLinkValidationError::AliasTooLong { max: ALIAS_MAX });
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ShortLinkValidationError::InvalidAliasCharacter);
        }
        Ok(Self(value))
    }

    /// Borrow the alias.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Alias> for String {
    fn from(value: Alias) -> Self {
        value.0
    }
}

impl TryFrom<String> for Alias {
    type Error = ShortLinkValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Absolute target URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LongLink(Url);

impl LongLink {
    /// Parse and construct a target URL.
    pub fn parse(value: &str) -> Result<Self, ShortLinkValidationError> {
        Url::parse(value)
            .map(Self)
            .map_err(|err| ShortLinkValidationError::InvalidLongLink {
                reason: err.to_string(),
            })
    }

    /// Borrow the parsed URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl fmt::Display for LongLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl From<LongLink> for String {
    fn from(value: LongLink) -> Self {
        value.0.into()
    }
}

impl TryFrom<String> for LongLink {
    type Error = ShortLinkValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

/// Unvalidated short link fields, as read from storage or a fixture.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortLinkDraft {
    /// Primary identifier.
    pub id: ShortLinkId,
    /// Alias shown in the short URL.
    pub alias: Alias,
    /// Redirect target.
    pub long_link: LongLink,
    /// Creation time; orders variants that share an alias.
    pub created_at: DateTime<Utc>,
    /// Last instant at which the link is active.
    #[serde(default)]
    pub expire_at: Option<DateTime<Utc>>,
}

/// Short link record.
///
/// ## Invariants
/// - `expire_at`, when present, is not earlier than `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ShortLinkDraft")]
pub struct ShortLink {
    id: ShortLinkId,
    alias: Alias,
    long_link: LongLink,
    created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expire_at: Option<DateTime<Utc>>,
}

impl ShortLink {
    /// Validate a draft into a short link.
    pub fn new(draft: ShortLinkDraft) -> Result<Self, ShortLinkValidationError> {
        let ShortLinkDraft {
            id,
            alias,
            long_link,
            created_at,
            expire_at,
        } = draft;
        if expire_at.is_some_and(|expiry| expiry < created_at) {
            return Err(ShortLinkValidationError::ExpiresBeforeCreation);
        }
        Ok(Self {
            id,
            alias,
            long_link,
            created_at,
            expire_at,
        })
    }

    /// Primary identifier.
    pub fn id(&self) -> &ShortLinkId {
        &self.id
    }

    /// Alias shown in the short URL.
    pub fn alias(&self) -> &Alias {
        &self.alias
    }

    /// Redirect target.
    pub fn long_link(&self) -> &LongLink {
        &self.long_link
    }

    /// Creation time.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Expiry time, if any.
    pub fn expire_at(&self) -> Option<DateTime<Utc>> {
        self.expire_at
    }

    /// Whether the link is still active at `at`.
    ///
    /// Only expiry bounds activity: a link without an expiry is always
    /// active, otherwise it is active up to and including `expire_at`.
    ///
    /// # Examples
    /// ```
    /// use chrono::{Duration, TimeZone, Utc};
    /// use shortlink_core::domain::{Alias, LongLink, ShortLink, ShortLinkDraft, ShortLinkId};
    ///
    /// let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    /// let link = ShortLink::new(ShortLinkDraft {
    ///     id: ShortLinkId::new("1").unwrap(),
    ///     alias: Alias::new("docs").unwrap(),
    ///     long_link: LongLink::parse("https://example.com/docs").unwrap(),
    ///     created_at: created,
    ///     expire_at: Some(created + Duration::days(1)),
    /// })
    /// .unwrap();
    ///
    /// assert!(link.is_active_at(created - Duration::hours(1)));
    /// assert!(link.is_active_at(created + Duration::days(1)));
    /// assert!(!link.is_active_at(created + Duration::days(2)));
    /// ```
    pub fn is_active_at(&self, at: DateTime<Utc>) -> bool {
        self.expire_at.is_none_or(|expiry| at <= expiry)
    }
}

impl TryFrom<ShortLinkDraft> for ShortLink {
    type Error = ShortLinkValidationError;

    fn try_from(draft: ShortLinkDraft) -> Result<Self, Self::Error> {
        Self::new(draft)
    }
}

/// Fields recorded when a user takes ownership of a new short link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLinkInput {
    /// Link being claimed.
    pub id: ShortLinkId,
    /// Alias of the link at creation time.
    pub alias: Alias,
}

impl From<&ShortLink> for ShortLinkInput {
    fn from(link: &ShortLink) -> Self {
        Self {
            id: link.id.clone(),
            alias: link.alias.clone(),
        }
    }
}
