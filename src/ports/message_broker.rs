//! Message broker ports - keyed publish and consumer-group subscriptions.
//!
//! Producers append `(key, payload)` records to a topic. Consumers join a
//! named group; the broker tracks one committed position per group, and a
//! record is only considered consumed once its offset is committed.

use std::fmt;

use async_trait::async_trait;

/// Errors that can occur while talking to the broker.
#[derive(Debug, thiserror::Error)]
pub enum BrokerError {
    #[error("Failed to publish to '{topic}': {reason}")]
    PublishFailed { topic: String, reason: String },

    #[error("Failed to subscribe to '{topic}' as group '{group}': {reason}")]
    SubscribeFailed {
        topic: String,
        group: String,
        reason: String,
    },

    #[error("Failed to read from '{topic}': {reason}")]
    ReadFailed { topic: String, reason: String },

    #[error("Failed to commit offset {offset}: {reason}")]
    CommitFailed { offset: MessageOffset, reason: String },

    #[error("Malformed message at offset {offset}: {reason}")]
    Malformed { offset: MessageOffset, reason: String },

    #[error("Subscription is closed")]
    Closed,
}

/// Broker-assigned position of a record within its topic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageOffset(String);

impl MessageOffset {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One record read from a subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerMessage {
    pub key: String,
    pub payload: String,
    pub offset: MessageOffset,
}

/// Where a group with no committed position starts reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartOffset {
    /// Only records produced after the group is created.
    #[default]
    Latest,
    /// Every record still retained by the topic.
    Earliest,
}

/// Port for producing records.
#[async_trait]
pub trait BrokerProducer: Send + Sync {
    /// Append one record to `topic`.
    async fn send(&self, topic: &str, key: &str, payload: &str) -> Result<(), BrokerError>;
}

/// Port for opening consumer-group subscriptions.
#[async_trait]
pub trait BrokerConsumer: Send + Sync {
    /// Join `group` on `topic`. Auto-commit is never enabled.
    ///
    /// An existing group keeps its committed position; `from` only applies
    /// when the group is created.
    async fn subscribe(
        &self,
        topic: &str,
        group: &str,
        from: StartOffset,
    ) -> Result<Box<dyn Subscription>, BrokerError>;
}

/// An open subscription handle owned by a single reader.
#[async_trait]
pub trait Subscription: Send {
    /// Wait for the next record delivered to this consumer.
    ///
    /// Cancel-safe: dropping the future before it completes does not lose
    /// a record.
    async fn read_next(&mut self) -> Result<BrokerMessage, BrokerError>;

    /// Mark `message` consumed for the whole group.
    async fn commit(&mut self, message: &BrokerMessage) -> Result<(), BrokerError>;

    /// Retire `message` without delivering it, so it is neither redelivered
    /// to the group nor left pending. Used for records addressed to another
    /// reader of the topic.
    async fn skip(&mut self, message: &BrokerMessage) -> Result<(), BrokerError>;

    /// Release the subscription. Uncommitted records stay pending.
    async fn close(&mut self);
}
