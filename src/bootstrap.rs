//! Process startup: tracing and the shared clients.
//!
//! Store and broker clients are created once here and handed to every
//! handler and relay as `Arc<dyn Port>`.

use std::sync::Arc;

use secrecy::ExposeSecret;
use thiserror::Error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::adapters::broker::{InMemoryBroker, RedisStreamBroker, StreamSettings};
use crate::adapters::events::BrokerEventPublisher;
use crate::adapters::storage::{InMemoryKeyValueStore, KvSessionRepository, RedisKeyValueStore};
use crate::application::{
    CreateGameHandler, DeleteGameHandler, DropPieceHandler, GetGameStatusHandler, JoinGameHandler,
    LeaveGameHandler, StartGameHandler, StreamRelay,
};
use crate::config::{AppConfig, LogFormat, LoggingConfig};
use crate::ports::{BrokerConsumer, BrokerProducer, EventPublisher, SessionRepository};

/// Failures while wiring the process together.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Failed to connect to Redis: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Failed to install tracing subscriber: {0}")]
    Tracing(String),
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level. Output goes to stderr so a
/// relay can own stdout.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), BootstrapError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = match config.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    };
    result.map_err(|e| BootstrapError::Tracing(e.to_string()))
}

/// Process-wide shared clients.
#[derive(Clone)]
pub struct AppContext {
    pub sessions: Arc<dyn SessionRepository>,
    pub publisher: Arc<dyn EventPublisher>,
    pub consumer: Arc<dyn BrokerConsumer>,
    pub topic: String,
}

impl AppContext {
    /// Connect to the Redis store and the Redis Streams broker.
    pub async fn connect(config: &AppConfig) -> Result<Self, BootstrapError> {
        let store_client = redis::Client::open(config.redis.url.expose_secret().as_str())?;
        let store_conn = store_client.get_multiplexed_tokio_connection().await?;
        let store = RedisKeyValueStore::new(store_conn, config.redis.timeout());

        let broker_client = redis::Client::open(config.broker_url().expose_secret().as_str())?;
        let broker = RedisStreamBroker::connect(
            broker_client,
            StreamSettings {
                block: config.broker.block(),
                consumer_prefix: config.broker.consumer_prefix.clone(),
                reclaim_idle: config.broker.reclaim_idle(),
            },
        )
        .await?;

        tracing::info!(topic = %config.broker.topic, "Connected to store and broker");

        let broker = Arc::new(broker);
        Ok(Self::wire(
            Arc::new(KvSessionRepository::new(Arc::new(store))),
            broker.clone(),
            broker,
            config.broker.topic.clone(),
        ))
    }

    /// Fully in-process wiring, for tests and local experiments.
    pub fn in_memory(topic: impl Into<String>) -> (Self, InMemoryBroker) {
        let broker = InMemoryBroker::new();
        let context = Self::wire(
            Arc::new(KvSessionRepository::new(Arc::new(
                InMemoryKeyValueStore::new(),
            ))),
            Arc::new(broker.clone()),
            Arc::new(broker.clone()),
            topic.into(),
        );
        (context, broker)
    }

    fn wire(
        sessions: Arc<dyn SessionRepository>,
        producer: Arc<dyn BrokerProducer>,
        consumer: Arc<dyn BrokerConsumer>,
        topic: String,
    ) -> Self {
        let publisher = Arc::new(BrokerEventPublisher::new(producer, topic.clone()));
        Self {
            sessions,
            publisher,
            consumer,
            topic,
        }
    }

    // === Handlers ===

    pub fn create_handler(&self) -> CreateGameHandler {
        CreateGameHandler::new(self.sessions.clone())
    }

    pub fn delete_handler(&self) -> DeleteGameHandler {
        DeleteGameHandler::new(self.sessions.clone())
    }

    pub fn status_handler(&self) -> GetGameStatusHandler {
        GetGameStatusHandler::new(self.sessions.clone())
    }

    pub fn join_handler(&self) -> JoinGameHandler {
        JoinGameHandler::new(self.sessions.clone(), self.publisher.clone())
    }

    pub fn leave_handler(&self) -> LeaveGameHandler {
        LeaveGameHandler::new(self.sessions.clone(), self.publisher.clone())
    }

    pub fn start_handler(&self) -> StartGameHandler {
        StartGameHandler::new(self.sessions.clone(), self.publisher.clone())
    }

    pub fn drop_handler(&self) -> DropPieceHandler {
        DropPieceHandler::new(self.sessions.clone(), self.publisher.clone())
    }

    pub fn relay(&self) -> StreamRelay {
        StreamRelay::new(self.sessions.clone(), self.consumer.clone(), self.topic.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{CreateGameCommand, JoinGameCommand};

    #[tokio::test]
    async fn in_memory_context_publishes_to_its_topic() {
        let (context, broker) = AppContext::in_memory("games");

        let created = context
            .create_handler()
            .handle(CreateGameCommand::default())
            .await
            .unwrap();
        context
            .join_handler()
            .handle(JoinGameCommand {
                session_id: created.session.id().clone(),
                name: "Alice".to_string(),
            })
            .await
            .unwrap();

        let records = broker.records("games");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].0, created.session.id().as_str());
    }

    #[tokio::test]
    async fn connect_fails_fast_on_bad_url() {
        let config = AppConfig {
            redis: crate::config::RedisConfig::new("not a url"),
            broker: Default::default(),
            logging: Default::default(),
        };
        assert!(matches!(
            AppContext::connect(&config).await,
            Err(BootstrapError::Redis(_))
        ));
    }
}
