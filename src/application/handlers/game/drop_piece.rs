//! DropPieceHandler - Command handler for a player's move.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::session::{GameEvent, MoveResult};
use crate::ports::{EventPublisher, SessionRepository};

use super::common::{load_session, persist_and_broadcast, GameUpdate};
use super::GameError;

/// Command to drop a piece.
#[derive(Debug, Clone)]
pub struct DropPieceCommand {
    pub session_id: SessionId,
    pub name: String,
    /// 0-based column index.
    pub column: i32,
}

/// Handler for moves.
///
/// Checks, in order: a game is running, the player is seated, it is their
/// turn. Only then is the piece dropped.
pub struct DropPieceHandler {
    repository: Arc<dyn SessionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl DropPieceHandler {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: DropPieceCommand) -> Result<GameUpdate, GameError> {
        let mut session = load_session(self.repository.as_ref(), &cmd.session_id).await?;

        session.ensure_in_progress()?;
        session.ensure_turn_of(&cmd.name)?;
        let outcome = session.play_turn(cmd.column)?;

        match &outcome.result {
            MoveResult::Won { winner } => tracing::info!(
                session_id = %cmd.session_id,
                winner = %winner,
                column = outcome.column,
                "Game won"
            ),
            MoveResult::Drawn => {
                tracing::info!(session_id = %cmd.session_id, "Game drawn")
            }
            MoveResult::Continue { next } => tracing::debug!(
                session_id = %cmd.session_id,
                player = %outcome.player,
                column = outcome.column,
                row = outcome.row,
                next = %next,
                "Piece dropped"
            ),
        }

        persist_and_broadcast(
            self.repository.as_ref(),
            self.event_publisher.as_ref(),
            session,
            GameEvent::from(&outcome),
        )
        .await
    }
}
