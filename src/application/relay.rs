//! Stream relay - forwards one session's broadcasts to one live client.
//!
//! ```text
//! Connecting ──exists──► Subscribed ──► Relaying ──► Closed
//!     │                                   │  ▲
//!     └──missing──► (error, no subscription)  └──┘ read / forward / commit
//! ```
//!
//! Messages are committed only after they were written and flushed to the
//! client, so a connected spectator gets at-least-once delivery. The relay
//! never reorders: one message is in flight at a time. Messages for other
//! sessions are retired through `Subscription::skip` without a commit.

use std::sync::Arc;

use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::domain::foundation::SessionId;
use crate::ports::{
    BrokerConsumer, BrokerError, BrokerMessage, ClientSink, SessionRepository, SinkError,
    StartOffset, StoreError, Subscription,
};

/// Failures that stop a relay before it starts relaying.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Session {0} not found")]
    SessionNotFound(SessionId),

    #[error("Store failure: {0}")]
    Store(#[from] StoreError),

    #[error("Could not subscribe: {0}")]
    Subscribe(#[source] BrokerError),

    #[error("Could not reach client: {0}")]
    Client(#[from] SinkError),
}

/// Why a running relay stopped.
#[derive(Debug)]
pub enum CloseReason {
    /// The connection's cancellation token fired.
    Cancelled,
    /// Writing to the client failed; the message stays uncommitted.
    ClientGone(SinkError),
    /// The broker read failed.
    ReadFailed(BrokerError),
    /// A forwarded message could not be committed.
    CommitFailed(BrokerError),
}

/// Summary of a finished relay.
#[derive(Debug)]
pub struct RelayOutcome {
    pub forwarded: u64,
    pub skipped: u64,
    pub reason: CloseReason,
}

/// Per-connection relay from the broadcast topic to a client.
///
/// Cheap to clone; every connection runs its own `run` call.
#[derive(Clone)]
pub struct StreamRelay {
    repository: Arc<dyn SessionRepository>,
    consumer: Arc<dyn BrokerConsumer>,
    topic: String,
}

impl StreamRelay {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        consumer: Arc<dyn BrokerConsumer>,
        topic: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            consumer,
            topic: topic.into(),
        }
    }

    /// The notice sent once the session is known to exist.
    pub fn connected_notice(session_id: &SessionId) -> String {
        format!("Connected to session {}\n\n", session_id)
    }

    /// Relay `session_id` to `sink` until `cancel` fires or a step fails.
    ///
    /// # Errors
    ///
    /// Only setup failures are errors: unknown session, store failure, the
    /// initial notice not reaching the client, or the subscription failing.
    /// Once relaying, every exit is reported through `RelayOutcome`.
    pub async fn run(
        &self,
        session_id: &SessionId,
        sink: &mut dyn ClientSink,
        cancel: CancellationToken,
    ) -> Result<RelayOutcome, RelayError> {
        // Connecting
        if !self.repository.exists(session_id).await? {
            tracing::warn!(session_id = %session_id, "Relay refused, unknown session");
            return Err(RelayError::SessionNotFound(session_id.clone()));
        }
        sink.send(&Self::connected_notice(session_id)).await?;
        sink.flush().await?;

        // Subscribed
        let mut subscription = self
            .consumer
            .subscribe(&self.topic, session_id.as_str(), StartOffset::Latest)
            .await
            .map_err(RelayError::Subscribe)?;
        tracing::info!(session_id = %session_id, topic = %self.topic, "Relay connected");

        // Relaying
        let outcome = relay_loop(session_id, subscription.as_mut(), sink, &cancel).await;

        // Closed
        subscription.close().await;
        match &outcome.reason {
            CloseReason::Cancelled | CloseReason::ClientGone(_) => tracing::info!(
                session_id = %session_id,
                forwarded = outcome.forwarded,
                skipped = outcome.skipped,
                reason = ?outcome.reason,
                "Relay closed"
            ),
            CloseReason::ReadFailed(_) | CloseReason::CommitFailed(_) => tracing::error!(
                session_id = %session_id,
                forwarded = outcome.forwarded,
                skipped = outcome.skipped,
                reason = ?outcome.reason,
                "Relay stopped on broker failure"
            ),
        }
        Ok(outcome)
    }
}

async fn relay_loop(
    session_id: &SessionId,
    subscription: &mut dyn Subscription,
    sink: &mut dyn ClientSink,
    cancel: &CancellationToken,
) -> RelayOutcome {
    let mut forwarded = 0;
    let mut skipped = 0;
    let close = |reason, forwarded, skipped| RelayOutcome {
        forwarded,
        skipped,
        reason,
    };

    loop {
        let message = tokio::select! {
            biased;
            _ = cancel.cancelled() => return close(CloseReason::Cancelled, forwarded, skipped),
            read = subscription.read_next() => match read {
                Ok(message) => message,
                Err(e) => return close(CloseReason::ReadFailed(e), forwarded, skipped),
            },
        };

        if message.key != session_id.as_str() {
            tracing::trace!(
                session_id = %session_id,
                key = %message.key,
                offset = %message.offset,
                "Skipping message for another session"
            );
            skipped += 1;
            if let Err(e) = subscription.skip(&message).await {
                tracing::warn!(
                    session_id = %session_id,
                    offset = %message.offset,
                    error = %e,
                    "Could not retire skipped message"
                );
            }
            continue;
        }

        // A stalled client must not outlive the connection.
        let written = tokio::select! {
            biased;
            _ = cancel.cancelled() => return close(CloseReason::Cancelled, forwarded, skipped),
            written = forward(sink, &message) => written,
        };
        if let Err(e) = written {
            return close(CloseReason::ClientGone(e), forwarded, skipped);
        }

        if let Err(e) = subscription.commit(&message).await {
            tracing::error!(
                session_id = %session_id,
                offset = %message.offset,
                error = %e,
                "Commit failed after forwarding"
            );
            return close(CloseReason::CommitFailed(e), forwarded + 1, skipped);
        }
        forwarded += 1;
        tracing::debug!(session_id = %session_id, offset = %message.offset, "Message relayed");
    }
}

async fn forward(sink: &mut dyn ClientSink, message: &BrokerMessage) -> Result<(), SinkError> {
    sink.send(&message.payload).await?;
    sink.flush().await
}
