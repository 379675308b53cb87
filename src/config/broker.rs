//! Broker configuration (Redis Streams)

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::redis::is_redis_url;

/// Broker configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BrokerConfig {
    /// Broker URL; the Redis store URL is used when unset
    #[serde(default)]
    pub url: Option<SecretString>,

    /// Stream that carries every session's broadcasts
    #[serde(default = "default_topic")]
    pub topic: String,

    /// How long one blocking read waits before polling again
    #[serde(default = "default_block_ms")]
    pub block_ms: u64,

    /// Prefix of each relay's consumer name
    #[serde(default = "default_consumer_prefix")]
    pub consumer_prefix: String,

    /// Pending records idle this long are taken over by a new relay
    #[serde(default = "default_reclaim_idle_ms")]
    pub reclaim_idle_ms: u64,
}

impl BrokerConfig {
    /// Get the blocking read interval as Duration
    pub fn block(&self) -> Duration {
        Duration::from_millis(self.block_ms)
    }

    /// Get the reclaim threshold as Duration
    pub fn reclaim_idle(&self) -> Duration {
        Duration::from_millis(self.reclaim_idle_ms)
    }

    /// Validate broker configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(url) = &self.url {
            if !is_redis_url(url.expose_secret()) {
                return Err(ValidationError::InvalidBrokerUrl);
            }
        }
        if self.topic.trim().is_empty() {
            return Err(ValidationError::MissingRequired("BROKER__TOPIC"));
        }
        if self.consumer_prefix.trim().is_empty() {
            return Err(ValidationError::MissingRequired("BROKER__CONSUMER_PREFIX"));
        }
        if self.block_ms == 0 || self.block_ms > 60_000 {
            return Err(ValidationError::InvalidBlockInterval);
        }
        Ok(())
    }
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            url: None,
            topic: default_topic(),
            block_ms: default_block_ms(),
            consumer_prefix: default_consumer_prefix(),
            reclaim_idle_ms: default_reclaim_idle_ms(),
        }
    }
}

fn default_topic() -> String {
    "broadcast".to_string()
}

fn default_block_ms() -> u64 {
    5_000
}

fn default_consumer_prefix() -> String {
    "relay".to_string()
}

fn default_reclaim_idle_ms() -> u64 {
    30_000
}
