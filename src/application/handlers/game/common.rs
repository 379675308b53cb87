//! Steps shared by the mutating game handlers.

use crate::domain::foundation::SessionId;
use crate::domain::session::{render, GameEvent, Session};
use crate::ports::{EventPublisher, SessionRepository, StoreError};

use super::GameError;

/// Outcome of a successful mutating command.
#[derive(Debug, Clone)]
pub struct GameUpdate {
    pub session: Session,
    pub event: GameEvent,
    /// The text broadcast to spectators (and returned to the caller).
    pub message: String,
}

/// Load a session, turning a store miss into `SessionNotFound`.
pub(crate) async fn load_session(
    repository: &dyn SessionRepository,
    id: &SessionId,
) -> Result<Session, GameError> {
    match repository.load(id).await {
        Ok(session) => Ok(session),
        Err(StoreError::NotFound(_)) => Err(GameError::SessionNotFound(id.clone())),
        Err(e) => {
            tracing::error!(session_id = %id, error = %e, "Failed to load session");
            Err(e.into())
        }
    }
}

/// Persist the mutated session, then broadcast the event.
///
/// A broadcast failure is returned after the save; the new state stays.
pub(crate) async fn persist_and_broadcast(
    repository: &dyn SessionRepository,
    publisher: &dyn EventPublisher,
    session: Session,
    event: GameEvent,
) -> Result<GameUpdate, GameError> {
    repository.save(&session).await.map_err(|e| {
        tracing::error!(session_id = %session.id(), error = %e, "Failed to save session");
        e
    })?;

    let message = render::broadcast_text(&session, &event);
    if let Err(e) = publisher.publish(session.id(), message.clone()).await {
        tracing::warn!(
            session_id = %session.id(),
            event = event.event_type(),
            error = %e,
            "Session saved but broadcast failed"
        );
        return Err(e.into());
    }

    tracing::debug!(session_id = %session.id(), event = event.event_type(), "Change broadcast");
    Ok(GameUpdate {
        session,
        event,
        message,
    })
}
