//! Errors surfaced by the game handlers.

use thiserror::Error;

use crate::domain::foundation::{ErrorCategory, ErrorCode, SessionId};
use crate::domain::session::SessionError;
use crate::ports::{BrokerError, StoreError};

/// Everything a game command or query can fail with.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Session {0} not found")]
    SessionNotFound(SessionId),

    #[error("Session {0} already exists")]
    SessionExists(SessionId),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Store failure: {0}")]
    Store(#[from] StoreError),

    /// The change was saved but spectators were not told.
    #[error("Broadcast failure: {0}")]
    Broker(#[from] BrokerError),
}

impl GameError {
    pub fn code(&self) -> ErrorCode {
        match self {
            GameError::SessionNotFound(_) => ErrorCode::SessionNotFound,
            GameError::SessionExists(_) => ErrorCode::SessionExists,
            GameError::Session(e) => e.code(),
            GameError::Store(_) => ErrorCode::StoreError,
            GameError::Broker(_) => ErrorCode::BrokerError,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.code().category()
    }
}
