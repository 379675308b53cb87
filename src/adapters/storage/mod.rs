//! Storage Adapters
//!
//! Implementations of the `KeyValueStore` and `SessionRepository` ports.
//!
//! ## Available Adapters
//!
//! - **RedisKeyValueStore** - GET/SET/DEL against Redis
//! - **InMemoryKeyValueStore** - Process-local map (testing/development)
//! - **KvSessionRepository** - JSON-encoded sessions over either store
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{KvSessionRepository, RedisKeyValueStore};
//!
//! let store = RedisKeyValueStore::new(conn, Duration::from_secs(5));
//! let sessions = KvSessionRepository::new(Arc::new(store));
//! ```

mod in_memory_store;
mod kv_session_repository;
mod redis_store;

pub use in_memory_store::InMemoryKeyValueStore;
pub use kv_session_repository::KvSessionRepository;
pub use redis_store::RedisKeyValueStore;
