//! Redis-backed key-value store for production deployments.
//!
//! Plain GET / SET / DEL on a shared multiplexed connection. Each call is
//! bounded by the configured command timeout.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::ports::{KeyValueStore, StoreError};

/// Redis-backed key-value store.
///
/// Cloning is cheap; clones share the underlying connection.
#[derive(Clone)]
pub struct RedisKeyValueStore {
    conn: MultiplexedConnection,
    timeout: Duration,
}

impl RedisKeyValueStore {
    /// Create a new store over an established connection.
    pub fn new(conn: MultiplexedConnection, timeout: Duration) -> Self {
        Self { conn, timeout }
    }

    async fn bounded<T, F>(&self, op: &'static str, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, redis::RedisError>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result.map_err(|e: redis::RedisError| StoreError::Backend(e.to_string())),
            Err(_) => Err(StoreError::Backend(format!(
                "{} timed out after {}ms",
                op,
                self.timeout.as_millis()
            ))),
        }
    }
}

#[async_trait]
impl KeyValueStore for RedisKeyValueStore {
    async fn get(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        let mut conn = self.conn.clone();
        let value: Option<Vec<u8>> = self.bounded("GET", conn.get(key)).await?;
        value.ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        self.bounded("SET", conn.set::<_, _, ()>(key, value)).await
    }

    async fn del(&self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        self.bounded("DEL", conn.del::<_, ()>(key)).await
    }
}
