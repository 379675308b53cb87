//! Session repository over any key-value store.
//!
//! One entry per session id; the value is the JSON encoding of the whole
//! aggregate, players and grid included.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::foundation::SessionId;
use crate::domain::session::Session;
use crate::ports::{KeyValueStore, SessionRepository, StoreError};

/// Persistence adapter mapping session ids to serialized sessions.
#[derive(Clone)]
pub struct KvSessionRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvSessionRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Encode a session exactly as it is stored.
    pub fn encode(session: &Session) -> Result<Vec<u8>, StoreError> {
        serde_json::to_vec(session).map_err(|e| StoreError::SerializationFailed(e.to_string()))
    }

    /// Decode a stored session blob.
    pub fn decode(bytes: &[u8]) -> Result<Session, StoreError> {
        serde_json::from_slice(bytes).map_err(|e| StoreError::DeserializationFailed(e.to_string()))
    }
}

#[async_trait]
impl SessionRepository for KvSessionRepository {
    async fn load(&self, id: &SessionId) -> Result<Session, StoreError> {
        let bytes = self.store.get(id.as_str()).await?;
        let session = Self::decode(&bytes)?;
        tracing::debug!(session_id = %id, bytes = bytes.len(), "Session loaded");
        Ok(session)
    }

    async fn save(&self, session: &Session) -> Result<(), StoreError> {
        let bytes = Self::encode(session)?;
        let len = bytes.len();
        self.store.set(session.id().as_str(), bytes).await?;
        tracing::debug!(session_id = %session.id(), bytes = len, "Session saved");
        Ok(())
    }

    async fn delete(&self, id: &SessionId) -> Result<(), StoreError> {
        self.store.del(id.as_str()).await?;
        tracing::debug!(session_id = %id, "Session deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryKeyValueStore;
    use crate::domain::session::{Player, PlayerName};

    fn repository() -> (KvSessionRepository, InMemoryKeyValueStore) {
        let store = InMemoryKeyValueStore::new();
        (KvSessionRepository::new(Arc::new(store.clone())), store)
    }

    fn played_session() -> Session {
        let mut session = Session::create(SessionId::parse("round-trip").unwrap());
        session
            .add_player(Player::new(PlayerName::new("Alice").unwrap()))
            .unwrap();
        session
            .add_player(Player::new(PlayerName::new("Bob").unwrap()))
            .unwrap();
        session.start().unwrap();
        for column in [3, 3, 4, 2, 0] {
            session.play_turn(column).unwrap();
        }
        session
    }

    #[tokio::test]
    async fn save_then_load_reconstructs_every_field() {
        let (repo, _) = repository();
        let session = played_session();

        repo.save(&session).await.unwrap();
        let loaded = repo.load(session.id()).await.unwrap();

        assert_eq!(loaded, session);
        assert_eq!(loaded.occupied_slots(), 5);
        assert_eq!(loaded.starts_count(), 1);
    }

    #[tokio::test]
    async fn load_unknown_id_is_not_found() {
        let (repo, _) = repository();
        let err = repo.load(&SessionId::new()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn corrupt_blob_fails_to_decode() {
        let (repo, store) = repository();
        store.set("broken", b"{not json".to_vec()).await.unwrap();
        let err = repo.load(&SessionId::parse("broken").unwrap()).await.unwrap_err();
        assert!(matches!(err, StoreError::DeserializationFailed(_)));
    }

    #[tokio::test]
    async fn delete_removes_entry_and_tolerates_unknown_ids() {
        let (repo, store) = repository();
        let session = played_session();
        repo.save(&session).await.unwrap();

        repo.delete(session.id()).await.unwrap();
        repo.delete(session.id()).await.unwrap();

        assert!(!repo.exists(session.id()).await.unwrap());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn save_overwrites_last_write_wins() {
        let (repo, _) = repository();
        let mut session = played_session();
        repo.save(&session).await.unwrap();

        session.play_turn(6).unwrap();
        repo.save(&session).await.unwrap();

        let loaded = repo.load(session.id()).await.unwrap();
        assert_eq!(loaded.occupied_slots(), 6);
    }
}
