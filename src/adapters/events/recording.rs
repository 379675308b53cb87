//! Recording event publisher for testing.
//!
//! Captures every published message instead of sending it anywhere.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::foundation::SessionId;
use crate::ports::{BrokerError, EventPublisher};

/// Event publisher that keeps what it was asked to publish.
///
/// # Example
///
/// ```ignore
/// let publisher = Arc::new(RecordingEventPublisher::new());
/// handler.handle(cmd).await?;
/// assert_eq!(publisher.message_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct RecordingEventPublisher {
    published: Mutex<Vec<(SessionId, String)>>,
    failing: Mutex<bool>,
}

impl RecordingEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// A publisher whose every publish fails.
    pub fn failing() -> Self {
        let publisher = Self::default();
        *lock(&publisher.failing) = true;
        publisher
    }

    /// All published messages in order.
    pub fn messages(&self) -> Vec<(SessionId, String)> {
        lock(&self.published).clone()
    }

    /// Messages published for one session.
    pub fn messages_for(&self, id: &SessionId) -> Vec<String> {
        lock(&self.published)
            .iter()
            .filter(|(sid, _)| sid == id)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn message_count(&self) -> usize {
        lock(&self.published).len()
    }

    /// The most recent message, if any.
    pub fn last_message(&self) -> Option<String> {
        lock(&self.published).last().map(|(_, m)| m.clone())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl EventPublisher for RecordingEventPublisher {
    async fn publish(&self, session_id: &SessionId, message: String) -> Result<(), BrokerError> {
        if *lock(&self.failing) {
            return Err(BrokerError::PublishFailed {
                topic: "recording".to_string(),
                reason: "simulated failure".to_string(),
            });
        }
        lock(&self.published).push((session_id.clone(), message));
        Ok(())
    }
}
