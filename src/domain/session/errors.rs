//! Session-specific error types.

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, ValidationError};

use super::player::PlayerName;

/// Errors raised by the session aggregate and its guards.
///
/// Every variant is recoverable: a failed operation leaves the session
/// exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Session already seats {capacity} players")]
    CapacityExceeded { capacity: usize },

    #[error("Name '{0}' is already taken in this session")]
    DuplicateName(PlayerName),

    #[error("Player '{0}' is not seated in this session")]
    PlayerNotFound(String),

    #[error("Column {column} is out of range")]
    OutOfRange { column: i32 },

    #[error("Column {column} has no free slots")]
    ColumnFull { column: usize },

    #[error("A game needs exactly 2 players, {seated} seated")]
    NotEnoughPlayers { seated: usize },

    #[error("It is {expected}'s turn")]
    NotYourTurn { expected: PlayerName },

    #[error("Game has not started")]
    GameNotStarted,

    #[error("Game is in progress")]
    GameInProgress,

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),
}

impl SessionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::CapacityExceeded { .. } => ErrorCode::CapacityExceeded,
            SessionError::DuplicateName(_) => ErrorCode::DuplicateName,
            SessionError::PlayerNotFound(_) => ErrorCode::PlayerNotFound,
            SessionError::OutOfRange { .. } => ErrorCode::OutOfRange,
            SessionError::ColumnFull { .. } => ErrorCode::ColumnFull,
            SessionError::NotEnoughPlayers { .. } => ErrorCode::NotEnoughPlayers,
            SessionError::NotYourTurn { .. } => ErrorCode::NotYourTurn,
            SessionError::GameNotStarted => ErrorCode::GameNotStarted,
            SessionError::GameInProgress => ErrorCode::GameInProgress,
            SessionError::Validation(_) => ErrorCode::ValidationFailed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCategory;

    #[test]
    fn messages_are_descriptive() {
        let err = SessionError::ColumnFull { column: 3 };
        assert_eq!(err.to_string(), "Column 3 has no free slots");

        let err = SessionError::NotYourTurn {
            expected: PlayerName::new("Bob").unwrap(),
        };
        assert_eq!(err.to_string(), "It is Bob's turn");
    }

    #[test]
    fn player_not_found_is_a_miss() {
        let err = SessionError::PlayerNotFound("Carol".to_string());
        assert_eq!(err.code().category(), ErrorCategory::NotFound);
    }

    #[test]
    fn illegal_moves_are_validation_failures() {
        for err in [
            SessionError::CapacityExceeded { capacity: 2 },
            SessionError::OutOfRange { column: 7 },
            SessionError::GameNotStarted,
            SessionError::Validation(ValidationError::empty_field("name")),
        ] {
            assert_eq!(err.code().category(), ErrorCategory::Validation);
        }
    }
}
