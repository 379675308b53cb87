//! Seated players and their validated names.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Minimum length for a player name.
pub const MIN_NAME_LENGTH: usize = 1;

/// Maximum length for a player name.
pub const MAX_NAME_LENGTH: usize = 10;

/// Player name, 1-10 characters, unique within a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerName(String);

impl PlayerName {
    /// Validates and wraps a player name.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the name is empty
    /// - `LengthOutOfRange` if the name is longer than 10 characters
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        let length = raw.chars().count();
        if length < MIN_NAME_LENGTH {
            return Err(ValidationError::empty_field("name"));
        }
        if length > MAX_NAME_LENGTH {
            return Err(ValidationError::length_out_of_range(
                "name",
                MIN_NAME_LENGTH,
                MAX_NAME_LENGTH,
                length,
            ));
        }
        Ok(Self(raw))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A player seated in a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: PlayerName,
    wins: u32,
}

impl Player {
    /// Creates a player with no wins.
    pub fn new(name: PlayerName) -> Self {
        Self { name, wins: 0 }
    }

    /// Returns the player's name.
    pub fn name(&self) -> &PlayerName {
        &self.name
    }

    /// Returns the number of games this player has won in the session.
    pub fn wins(&self) -> u32 {
        self.wins
    }

    pub(crate) fn record_win(&mut self) {
        self.wins += 1;
    }
}
