//! EventPublisher port - broadcasts session updates to spectators.
//!
//! This port defines how handlers announce a state change without knowing
//! about the underlying broker.

use async_trait::async_trait;

use crate::domain::foundation::SessionId;

use super::BrokerError;

/// Port for broadcasting rendered session updates.
///
/// Implementations must ensure:
/// - Messages for one session are delivered in publish order
/// - Errors are propagated to the caller, never swallowed
///
/// # Example
///
/// ```ignore
/// let text = render::broadcast_text(&session, &event);
/// publisher.publish(session.id(), text).await?;
/// ```
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a ready-to-display message addressed to `session_id`.
    async fn publish(&self, session_id: &SessionId, message: String) -> Result<(), BrokerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn EventPublisher) {}
}
