//! DeleteGameHandler - Command handler for removing a session.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::ports::SessionRepository;

use super::GameError;

/// Command to delete a session.
#[derive(Debug, Clone)]
pub struct DeleteGameCommand {
    pub session_id: SessionId,
}

/// Handler for deleting sessions. Deleting an unknown id succeeds.
pub struct DeleteGameHandler {
    repository: Arc<dyn SessionRepository>,
}

impl DeleteGameHandler {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeleteGameCommand) -> Result<(), GameError> {
        self.repository.delete(&cmd.session_id).await?;
        tracing::info!(session_id = %cmd.session_id, "Session deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::game::testing::Fixture;

    #[tokio::test]
    async fn deletes_existing_session() {
        let fixture = Fixture::new();
        let id = fixture.seed(&["Alice"], false).await;
        let handler = DeleteGameHandler::new(fixture.repository());

        handler
            .handle(DeleteGameCommand {
                session_id: id.clone(),
            })
            .await
            .unwrap();

        assert!(fixture.stored(&id).await.is_none());
    }

    #[tokio::test]
    async fn deleting_unknown_session_succeeds() {
        let fixture = Fixture::new();
        let handler = DeleteGameHandler::new(fixture.repository());
        let result = handler
            .handle(DeleteGameCommand {
                session_id: SessionId::new(),
            })
            .await;
        assert!(result.is_ok());
    }
}
