//! Broker adapters.
//!
//! - `RedisStreamBroker` - Redis Streams with consumer groups (production)
//! - `InMemoryBroker` - Process-local broker with the same group semantics

mod in_memory;
mod redis_streams;

pub use in_memory::{InMemoryBroker, InMemorySubscription};
pub use redis_streams::{RedisStreamBroker, RedisStreamSubscription, StreamSettings};
