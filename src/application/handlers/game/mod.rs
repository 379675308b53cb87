//! Game command and query handlers.
//!
//! Every mutating handler follows the same steps: load the session, check
//! the guards, apply one mutation, save, broadcast. Nothing is retried and
//! no lock is held across the store or broker calls.

mod common;
mod create_game;
mod delete_game;
mod drop_piece;
mod errors;
mod get_game_status;
mod join_game;
mod leave_game;
mod start_game;

pub use common::GameUpdate;
pub use create_game::{CreateGameCommand, CreateGameHandler, CreateGameResult};
pub use delete_game::{DeleteGameCommand, DeleteGameHandler};
pub use drop_piece::{DropPieceCommand, DropPieceHandler};
pub use errors::GameError;
pub use get_game_status::{GameStatusView, GetGameStatusHandler, GetGameStatusQuery};
pub use join_game::{JoinGameCommand, JoinGameHandler};
pub use leave_game::{LeaveGameCommand, LeaveGameHandler};
pub use start_game::{StartGameCommand, StartGameHandler};

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use crate::adapters::events::RecordingEventPublisher;
    use crate::adapters::storage::{InMemoryKeyValueStore, KvSessionRepository};
    use crate::domain::foundation::SessionId;
    use crate::domain::session::{Player, PlayerName, Session};
    use crate::ports::{EventPublisher, SessionRepository};

    /// In-memory repository and recording publisher shared by handler tests.
    pub struct Fixture {
        pub repository: Arc<KvSessionRepository>,
        pub publisher: Arc<RecordingEventPublisher>,
    }

    impl Fixture {
        pub fn new() -> Self {
            Self::with_publisher(RecordingEventPublisher::new())
        }

        pub fn with_failing_publisher() -> Self {
            Self::with_publisher(RecordingEventPublisher::failing())
        }

        fn with_publisher(publisher: RecordingEventPublisher) -> Self {
            let store = Arc::new(InMemoryKeyValueStore::new());
            Self {
                repository: Arc::new(KvSessionRepository::new(store)),
                publisher: Arc::new(publisher),
            }
        }

        pub fn repository(&self) -> Arc<dyn SessionRepository> {
            self.repository.clone()
        }

        pub fn publisher(&self) -> Arc<dyn EventPublisher> {
            self.publisher.clone()
        }

        /// Store a session with the given players, optionally started.
        pub async fn seed(&self, names: &[&str], started: bool) -> SessionId {
            let mut session = Session::create(SessionId::new());
            for name in names {
                session
                    .add_player(Player::new(PlayerName::new(*name).unwrap()))
                    .unwrap();
            }
            if started {
                session.start().unwrap();
            }
            self.repository.save(&session).await.unwrap();
            session.id().clone()
        }

        pub async fn stored(&self, id: &SessionId) -> Option<Session> {
            self.repository.load(id).await.ok()
        }
    }
}
