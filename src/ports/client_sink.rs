//! Client sink port - the one live connection a relay writes to.

use async_trait::async_trait;

/// Errors raised while writing to a client.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Client disconnected")]
    Disconnected,

    #[error("Failed to write to client: {0}")]
    Io(#[from] std::io::Error),
}

/// A streaming, flushable text connection to one client.
#[async_trait]
pub trait ClientSink: Send {
    /// Queue `text` for the client.
    async fn send(&mut self, text: &str) -> Result<(), SinkError>;

    /// Push everything queued so far to the client.
    async fn flush(&mut self) -> Result<(), SinkError>;
}
