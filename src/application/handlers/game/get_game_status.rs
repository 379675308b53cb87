//! GetGameStatusHandler - Query handler for a session's current state.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::session::{render, Session};
use crate::ports::SessionRepository;

use super::common::load_session;
use super::GameError;

/// Query for one session.
#[derive(Debug, Clone)]
pub struct GetGameStatusQuery {
    pub session_id: SessionId,
}

/// Current state plus its text rendering.
#[derive(Debug, Clone)]
pub struct GameStatusView {
    pub session: Session,
    pub rendering: String,
}

/// Handler for reading a session without changing it.
pub struct GetGameStatusHandler {
    repository: Arc<dyn SessionRepository>,
}

impl GetGameStatusHandler {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetGameStatusQuery) -> Result<GameStatusView, GameError> {
        let session = load_session(self.repository.as_ref(), &query.session_id).await?;

        let announcement = match session.current_player() {
            Some(player) if session.status() => format!("Waiting for {} to move", player.name()),
            _ => "Waiting for the next game".to_string(),
        };
        let rendering = render::snapshot(&session, &announcement);
        Ok(GameStatusView { session, rendering })
    }
}
