//! Key-value store port - the raw durable store behind session persistence.
//!
//! The store knows nothing about sessions; it maps string keys to opaque
//! byte blobs with last-write-wins semantics.

use async_trait::async_trait;

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Key not found: {0}")]
    NotFound(String),

    #[error("Failed to serialize value: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize value: {0}")]
    DeserializationFailed(String),

    #[error("Store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// True for a plain miss, as opposed to an infrastructure failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// Port for the external key-value store.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value stored under `key`.
    ///
    /// # Errors
    /// Returns `StoreError::NotFound` if nothing is stored under `key`
    async fn get(&self, key: &str) -> Result<Vec<u8>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;

    /// Remove `key`. Removing a missing key succeeds.
    async fn del(&self, key: &str) -> Result<(), StoreError>;
}
