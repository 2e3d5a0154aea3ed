//! Domain newtypes with validation
//!
//! Strongly-typed wrappers for event identifiers and content locators.
//! Each newtype ensures data validity at construction time.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::DomainError;

/// Unique identifier for an inbound external event
///
/// The host surface attaches one of these to every delivered event so the
/// intake pipeline can detect duplicate delivery (the same event observed
/// once at registration time and again at re-entry time).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    /// Create a new random EventId
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an EventId from an existing UUID
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID value
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for EventId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EventId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| DomainError::InvalidEventId(format!("Invalid UUID: {e}")))
    }
}

impl From<Uuid> for EventId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Opaque locator for externally-referenced content
///
/// The core never interprets the locator; only the [`ContentSource`]
/// adapter knows how to turn it into bytes. The only invariant enforced
/// here is that it is non-empty.
///
/// [`ContentSource`]: crate::ports::content_source::ContentSource
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentRef(String);

impl ContentRef {
    /// Create a new ContentRef
    ///
    /// # Errors
    /// Returns `DomainError::InvalidContentRef` if the locator is empty
    /// or whitespace-only
    pub fn new(locator: String) -> Result<Self, DomainError> {
        if locator.trim().is_empty() {
            return Err(DomainError::InvalidContentRef(
                "Content reference cannot be empty".to_string(),
            ));
        }
        Ok(Self(locator))
    }

    /// Get the inner string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ContentRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ContentRef {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl TryFrom<String> for ContentRef {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ContentRef> for String {
    fn from(locator: ContentRef) -> Self {
        locator.0
    }
}
