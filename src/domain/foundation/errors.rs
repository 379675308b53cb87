//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max} characters, got {actual}")]
    LengthOutOfRange {
        field: String,
        min: usize,
        max: usize,
        actual: usize,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates a length out of range validation error.
    pub fn length_out_of_range(
        field: impl Into<String>,
        min: usize,
        max: usize,
        actual: usize,
    ) -> Self {
        ValidationError::LengthOutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Broad classes of failure, used by transports to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Bad input or an illegal move; state is untouched.
    Validation,
    /// Unknown session or player.
    NotFound,
    /// Store or broker failure.
    Infrastructure,
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    CapacityExceeded,
    DuplicateName,
    OutOfRange,
    ColumnFull,
    NotEnoughPlayers,
    NotYourTurn,
    GameNotStarted,
    GameInProgress,
    SessionExists,

    // Not found errors
    SessionNotFound,
    PlayerNotFound,

    // Infrastructure errors
    StoreError,
    BrokerError,
    InternalError,
}

impl ErrorCode {
    /// Returns the taxonomy class this code belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorCode::SessionNotFound | ErrorCode::PlayerNotFound => ErrorCategory::NotFound,
            ErrorCode::StoreError | ErrorCode::BrokerError | ErrorCode::InternalError => {
                ErrorCategory::Infrastructure
            }
            _ => ErrorCategory::Validation,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::CapacityExceeded => "CAPACITY_EXCEEDED",
            ErrorCode::DuplicateName => "DUPLICATE_NAME",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::ColumnFull => "COLUMN_FULL",
            ErrorCode::NotEnoughPlayers => "NOT_ENOUGH_PLAYERS",
            ErrorCode::NotYourTurn => "NOT_YOUR_TURN",
            ErrorCode::GameNotStarted => "GAME_NOT_STARTED",
            ErrorCode::GameInProgress => "GAME_IN_PROGRESS",
            ErrorCode::SessionExists => "SESSION_EXISTS",
            ErrorCode::SessionNotFound => "SESSION_NOT_FOUND",
            ErrorCode::PlayerNotFound => "PLAYER_NOT_FOUND",
            ErrorCode::StoreError => "STORE_ERROR",
            ErrorCode::BrokerError => "BROKER_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}
