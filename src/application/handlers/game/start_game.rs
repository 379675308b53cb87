//! StartGameHandler - Command handler for beginning a game.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::session::{GameEvent, SessionError};
use crate::ports::{EventPublisher, SessionRepository};

use super::common::{load_session, persist_and_broadcast, GameUpdate};
use super::GameError;

/// Command to start (or restart) the game on a session.
#[derive(Debug, Clone)]
pub struct StartGameCommand {
    pub session_id: SessionId,
}

/// Handler for starting games.
pub struct StartGameHandler {
    repository: Arc<dyn SessionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl StartGameHandler {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: StartGameCommand) -> Result<GameUpdate, GameError> {
        let mut session = load_session(self.repository.as_ref(), &cmd.session_id).await?;

        session.ensure_idle()?;
        session.start()?;

        let first = session
            .current_player()
            .map(|p| p.name().clone())
            .ok_or(SessionError::NotEnoughPlayers {
                seated: session.players().len(),
            })?;

        tracing::info!(
            session_id = %cmd.session_id,
            game = session.starts_count(),
            first = %first,
            "Game started"
        );

        persist_and_broadcast(
            self.repository.as_ref(),
            self.event_publisher.as_ref(),
            session,
            GameEvent::GameStarted { first },
        )
        .await
    }
}
