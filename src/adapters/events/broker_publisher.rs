//! Event publisher backed by the message broker.
//!
//! Every broadcast is one record on a shared topic, keyed by session id so
//! the broker keeps per-session order.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::foundation::SessionId;
use crate::ports::{BrokerError, BrokerProducer, EventPublisher};

/// Publishes rendered session updates to a broker topic.
#[derive(Clone)]
pub struct BrokerEventPublisher {
    producer: Arc<dyn BrokerProducer>,
    topic: String,
}

impl BrokerEventPublisher {
    pub fn new(producer: Arc<dyn BrokerProducer>, topic: impl Into<String>) -> Self {
        Self {
            producer,
            topic: topic.into(),
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }
}

#[async_trait]
impl EventPublisher for BrokerEventPublisher {
    async fn publish(&self, session_id: &SessionId, message: String) -> Result<(), BrokerError> {
        self.producer
            .send(&self.topic, session_id.as_str(), &message)
            .await
            .map_err(|e| {
                tracing::error!(session_id = %session_id, topic = %self.topic, error = %e, "Broadcast failed");
                e
            })?;
        tracing::debug!(session_id = %session_id, topic = %self.topic, "Broadcast published");
        Ok(())
    }
}
