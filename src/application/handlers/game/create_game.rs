//! CreateGameHandler - Command handler for opening a new session.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::session::{render, Session};
use crate::ports::SessionRepository;

use super::GameError;

/// Command to create a session.
#[derive(Debug, Clone, Default)]
pub struct CreateGameCommand {
    /// Use this id instead of generating one.
    pub session_id: Option<SessionId>,
}

/// Result of successful session creation.
#[derive(Debug, Clone)]
pub struct CreateGameResult {
    pub session: Session,
    pub rendering: String,
}

/// Handler for creating sessions.
///
/// Nothing is broadcast: no one can be watching an id that did not exist.
pub struct CreateGameHandler {
    repository: Arc<dyn SessionRepository>,
}

impl CreateGameHandler {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// Create and store an empty session.
    ///
    /// # Errors
    ///
    /// - `SessionExists` if a supplied id is already in use; the stored
    ///   session is left alone
    pub async fn handle(&self, cmd: CreateGameCommand) -> Result<CreateGameResult, GameError> {
        let id = cmd.session_id.unwrap_or_default();
        if self.repository.exists(&id).await? {
            tracing::warn!(session_id = %id, "Create refused, id already in use");
            return Err(GameError::SessionExists(id));
        }

        let session = Session::create(id);
        self.repository.save(&session).await?;

        tracing::info!(session_id = %session.id(), "Session created");

        let headline = format!("Session {} has been created", session.id());
        let rendering = format!(
            "{}\n{}",
            headline,
            render::snapshot(&session, "Waiting for players to join")
        );
        Ok(CreateGameResult { session, rendering })
    }
}
