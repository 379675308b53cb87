//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Longest accepted session id; a generated UUID is 36 characters.
pub const MAX_SESSION_ID_LENGTH: usize = 40;

/// Opaque identifier of a game session.
///
/// Doubles as the store key, the broker message key and the consumer group
/// name of every relay watching the session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Creates a new random SessionId.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps an externally supplied id.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the id is blank
    /// - `LengthOutOfRange` if the id is longer than `MAX_SESSION_ID_LENGTH`
    /// - `InvalidFormat` if the id contains whitespace
    pub fn parse(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(ValidationError::empty_field("session_id"));
        }
        let length = raw.chars().count();
        if length > MAX_SESSION_ID_LENGTH {
            return Err(ValidationError::length_out_of_range(
                "session_id",
                1,
                MAX_SESSION_ID_LENGTH,
                length,
            ));
        }
        if raw.chars().any(char::is_whitespace) {
            return Err(ValidationError::invalid_format(
                "session_id",
                "must not contain whitespace",
            ));
        }
        Ok(Self(raw))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
