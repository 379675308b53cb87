//! Session repository port.
//!
//! Defines the contract for persisting and retrieving Session aggregates.
//!
//! # Design
//!
//! - **Whole-aggregate**: every save writes the full session
//! - **Last write wins**: no version check; concurrent read-modify-write
//!   on the same id can lose an update

use async_trait::async_trait;

use crate::domain::foundation::SessionId;
use crate::domain::session::Session;

use super::StoreError;

/// Repository port for Session aggregate persistence.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Load a session by its ID.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no session is stored under `id`
    /// - `DeserializationFailed` if the stored blob is not a session
    /// - `Backend` on store failure
    async fn load(&self, id: &SessionId) -> Result<Session, StoreError>;

    /// Save a session, replacing any stored copy.
    async fn save(&self, session: &Session) -> Result<(), StoreError>;

    /// Delete a session. Deleting an unknown id succeeds.
    async fn delete(&self, id: &SessionId) -> Result<(), StoreError>;

    /// Check if a session exists.
    async fn exists(&self, id: &SessionId) -> Result<bool, StoreError> {
        match self.load(id).await {
            Ok(_) => Ok(true),
            Err(StoreError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
