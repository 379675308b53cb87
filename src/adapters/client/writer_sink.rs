//! Client sink over any async byte writer (socket, stdout, pipe).

use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::ports::{ClientSink, SinkError};

/// Writes UTF-8 text to an `AsyncWrite`.
pub struct WriterSink<W> {
    writer: W,
}

impl<W> WriterSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn classify(err: std::io::Error) -> SinkError {
    match err.kind() {
        std::io::ErrorKind::BrokenPipe
        | std::io::ErrorKind::ConnectionReset
        | std::io::ErrorKind::ConnectionAborted => SinkError::Disconnected,
        _ => SinkError::Io(err),
    }
}

#[async_trait]
impl<W> ClientSink for WriterSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn send(&mut self, text: &str) -> Result<(), SinkError> {
        self.writer.write_all(text.as_bytes()).await.map_err(classify)
    }

    async fn flush(&mut self) -> Result<(), SinkError> {
        self.writer.flush().await.map_err(classify)
    }
}
