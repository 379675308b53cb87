//! JoinGameHandler - Command handler for seating a player.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::session::{GameEvent, Player, PlayerName, SessionError};
use crate::ports::{EventPublisher, SessionRepository};

use super::common::{load_session, persist_and_broadcast, GameUpdate};
use super::GameError;

/// Command to join a session.
#[derive(Debug, Clone)]
pub struct JoinGameCommand {
    pub session_id: SessionId,
    pub name: String,
}

/// Handler for joining sessions.
pub struct JoinGameHandler {
    repository: Arc<dyn SessionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl JoinGameHandler {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: JoinGameCommand) -> Result<GameUpdate, GameError> {
        // 1. Validate the name before touching the store
        let name = PlayerName::new(cmd.name).map_err(SessionError::from)?;

        // 2. Load session
        let mut session = load_session(self.repository.as_ref(), &cmd.session_id).await?;

        // 3. Seat the player
        session.ensure_idle()?;
        session.add_player(Player::new(name.clone()))?;

        tracing::info!(session_id = %cmd.session_id, player = %name, "Player joined");

        // 4. Persist and broadcast
        let event = GameEvent::PlayerJoined { name };
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

    fn join(id: &SessionId, name: &str) -> JoinGameCommand {
        JoinGameCommand {
            session_id: id.clone(),
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn seats_player_and_broadcasts() {
        let fixture = Fixture::new();
        let id = fixture.seed(&[], false).await;
        let handler = JoinGameHandler::new(fixture.repository(), fixture.publisher());

        let update = handler.handle(join(&id, "Alice")).await.unwrap();

        assert_eq!(update.session.players().len(), 1);
        assert!(update.message.starts_with("Alice joined the session"));
        let stored = fixture.stored(&id).await.unwrap();
        assert_eq!(stored.players()[0].name().as_str(), "Alice");
        assert_eq!(fixture.publisher.messages_for(&id), vec![update.message]);
    }

    #[tokio::test]
    async fn rejects_invalid_name_without_loading() {
        let fixture = Fixture::new();
        let handler = JoinGameHandler::new(fixture.repository(), fixture.publisher());

        let err = handler
            .handle(join(&SessionId::new(), "ElevenChars"))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn rejects_third_player() {
        let fixture = Fixture::new();
        let id = fixture.seed(&["Alice", "Bob"], false).await;
        let handler = JoinGameHandler::new(fixture.repository(), fixture.publisher());

        let err = handler.handle(join(&id, "Carol")).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::CapacityExceeded);
        assert_eq!(fixture.publisher.message_count(), 0);
    }

    #[tokio::test]
    async fn rejects_duplicate_name() {
        let fixture = Fixture::new();
        let id = fixture.seed(&["Alice"], false).await;
        let handler = JoinGameHandler::new(fixture.repository(), fixture.publisher());

        let err = handler.handle(join(&id, "Alice")).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::DuplicateName);
    }

    #[tokio::test]
    async fn rejects_join_during_game() {
        let fixture = Fixture::new();
        let id = fixture.seed(&["Alice", "Bob"], true).await;
        let handler = JoinGameHandler::new(fixture.repository(), fixture.publisher());

        let err = handler.handle(join(&id, "Carol")).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::GameInProgress);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let fixture = Fixture::new();
        let handler = JoinGameHandler::new(fixture.repository(), fixture.publisher());

        let err = handler.handle(join(&SessionId::new(), "Alice")).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::SessionNotFound);
    }

    #[tokio::test]
    async fn broadcast_failure_keeps_saved_state() {
        let fixture = Fixture::with_failing_publisher();
        let id = fixture.seed(&[], false).await;
        let handler = JoinGameHandler::new(fixture.repository(), fixture.publisher());

        let err = handler.handle(join(&id, "Alice")).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::BrokerError);
        let stored = fixture.stored(&id).await.unwrap();
        assert_eq!(stored.players().len(), 1);
    }
}
