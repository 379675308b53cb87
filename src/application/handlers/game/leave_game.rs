//! LeaveGameHandler - Command handler for removing a player.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::session::GameEvent;
use crate::ports::{EventPublisher, SessionRepository};

use super::common::{load_session, persist_and_broadcast, GameUpdate};
use super::GameError;

/// Command to leave a session.
#[derive(Debug, Clone)]
pub struct LeaveGameCommand {
    pub session_id: SessionId,
    pub name: String,
}

/// Handler for leaving sessions. Only allowed between games.
pub struct LeaveGameHandler {
    repository: Arc<dyn SessionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl LeaveGameHandler {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: LeaveGameCommand) -> Result<GameUpdate, GameError> {
        let mut session = load_session(self.repository.as_ref(), &cmd.session_id).await?;

        session.ensure_idle()?;
        let player = session.remove_player(&cmd.name)?;

        tracing::info!(session_id = %cmd.session_id, player = %player.name(), "Player left");

        let event = GameEvent::PlayerLeft {
            name: player.name().clone(),
        };
        persist_and_broadcast(
            self.repository.as_ref(),
            self.event_publisher.as_ref(),
            session,
            event,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::game::testing::Fixture;
    use crate::domain::foundation::ErrorCode;

    fn leave(id: &SessionId, name: &str) -> LeaveGameCommand {
        LeaveGameCommand {
            session_id: id.clone(),
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn removes_player_and_keeps_order() {
        let fixture = Fixture::new();
        let id = fixture.seed(&["Alice", "Bob"], false).await;
        let handler = LeaveGameHandler::new(fixture.repository(), fixture.publisher());

        let update = handler.handle(leave(&id, "Alice")).await.unwrap();

        assert!(update.message.starts_with("Alice left the session"));
        let stored = fixture.stored(&id).await.unwrap();
        let names: Vec<_> = stored.players().iter().map(|p| p.name().as_str()).collect();
        assert_eq!(names, vec!["Bob"]);
    }

    #[tokio::test]
    async fn unknown_player_is_not_found() {
        let fixture = Fixture::new();
        let id = fixture.seed(&["Alice"], false).await;
        let handler = LeaveGameHandler::new(fixture.repository(), fixture.publisher());

        let err = handler.handle(leave(&id, "Carol")).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::PlayerNotFound);
        assert_eq!(fixture.publisher.message_count(), 0);
    }

    #[tokio::test]
    async fn cannot_leave_running_game() {
        let fixture = Fixture::new();
        let id = fixture.seed(&["Alice", "Bob"], true).await;
        let handler = LeaveGameHandler::new(fixture.repository(), fixture.publisher());

        let err = handler.handle(leave(&id, "Alice")).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::GameInProgress);
        assert_eq!(fixture.stored(&id).await.unwrap().players().len(), 2);
    }
}
