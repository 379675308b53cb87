//! Redis Streams broker for production deployments.
//!
//! A topic is a stream key. Records are appended with `XADD` as two fields,
//! `key` and `payload`. Subscriptions are consumer groups read with
//! `XREADGROUP` and acknowledged with `XACK`. Records a reader skips are
//! acknowledged too, since a group's pending list is only trimmed per id.
//!
//! Each subscription owns a dedicated connection because `XREADGROUP ... BLOCK`
//! stalls every other command pipelined on the same connection.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::streams::{StreamId, StreamReadOptions, StreamReadReply};
use redis::{AsyncCommands, Client, RedisError, Value};

use crate::ports::{
    BrokerConsumer, BrokerError, BrokerMessage, BrokerProducer, MessageOffset, StartOffset,
    Subscription,
};

const KEY_FIELD: &str = "key";
const PAYLOAD_FIELD: &str = "payload";
const RECLAIM_BATCH: usize = 100;

/// Tuning for stream reads.
#[derive(Debug, Clone)]
pub struct StreamSettings {
    /// How long one `XREADGROUP` blocks before it is re-issued.
    pub block: Duration,
    /// Prefix of the unique consumer name given to each subscription.
    pub consumer_prefix: String,
    /// Pending records idle at least this long are taken over on subscribe.
    pub reclaim_idle: Duration,
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            block: Duration::from_millis(5_000),
            consumer_prefix: "relay".to_string(),
            reclaim_idle: Duration::from_secs(30),
        }
    }
}

/// Redis Streams producer and consumer.
#[derive(Clone)]
pub struct RedisStreamBroker {
    client: Client,
    producer: MultiplexedConnection,
    settings: StreamSettings,
}

impl RedisStreamBroker {
    /// Connect the shared producer connection.
    pub async fn connect(client: Client, settings: StreamSettings) -> Result<Self, RedisError> {
        let producer = client.get_multiplexed_tokio_connection().await?;
        Ok(Self {
            client,
            producer,
            settings,
        })
    }

    fn consumer_name(&self) -> String {
        format!("{}-{}", self.settings.consumer_prefix, uuid::Uuid::new_v4())
    }
}

#[async_trait]
impl BrokerProducer for RedisStreamBroker {
    async fn send(&self, topic: &str, key: &str, payload: &str) -> Result<(), BrokerError> {
        let mut conn = self.producer.clone();
        let id: String = conn
            .xadd(topic, "*", &[(KEY_FIELD, key), (PAYLOAD_FIELD, payload)])
            .await
            .map_err(|e: RedisError| BrokerError::PublishFailed {
                topic: topic.to_string(),
                reason: e.to_string(),
            })?;
        tracing::debug!(topic, key, offset = %id, "Record appended");
        Ok(())
    }
}

#[async_trait]
impl BrokerConsumer for RedisStreamBroker {
    async fn subscribe(
        &self,
        topic: &str,
        group: &str,
        from: StartOffset,
    ) -> Result<Box<dyn Subscription>, BrokerError> {
        let subscribe_failed = |e: RedisError| BrokerError::SubscribeFailed {
            topic: topic.to_string(),
            group: group.to_string(),
            reason: e.to_string(),
        };

        let mut conn = self
            .client
            .get_multiplexed_tokio_connection()
            .await
            .map_err(subscribe_failed)?;

        let start = match from {
            StartOffset::Latest => "$",
            StartOffset::Earliest => "0",
        };
        let created: Result<(), RedisError> =
            conn.xgroup_create_mkstream(topic, group, start).await;
        match created {
            Ok(()) => tracing::debug!(topic, group, start, "Consumer group created"),
            Err(e) if e.code() == Some("BUSYGROUP") => {
                tracing::debug!(topic, group, "Consumer group already exists")
            }
            Err(e) => return Err(subscribe_failed(e)),
        }

        let consumer = self.consumer_name();
        let reclaimed = reclaim_idle(&mut conn, topic, group, &consumer, self.settings.reclaim_idle)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(topic, group, error = %e, "Could not reclaim idle records");
                0
            });
        if reclaimed > 0 {
            tracing::info!(topic, group, consumer = %consumer, reclaimed, "Took over idle records");
        }

        Ok(Box::new(RedisStreamSubscription {
            conn: Some(conn),
            topic: topic.to_string(),
            group: group.to_string(),
            consumer,
            block: self.settings.block,
            backlog_cursor: Some("0".to_string()),
        }))
    }
}

/// Move records another consumer of `group` read but never acknowledged.
///
/// Needs `XAUTOCLAIM` (Redis 6.2+).
async fn reclaim_idle(
    conn: &mut MultiplexedConnection,
    topic: &str,
    group: &str,
    consumer: &str,
    min_idle: Duration,
) -> Result<usize, RedisError> {
    let reply: Value = redis::cmd("XAUTOCLAIM")
        .arg(topic)
        .arg(group)
        .arg(consumer)
        .arg(min_idle.as_millis() as u64)
        .arg("0-0")
        .arg("COUNT")
        .arg(RECLAIM_BATCH)
        .arg("JUSTID")
        .query_async(conn)
        .await?;

    // [next-cursor, [claimed ids...], ...]
    let claimed = match reply {
        Value::Bulk(parts) => match parts.get(1) {
            Some(Value::Bulk(ids)) => ids.len(),
            _ => 0,
        },
        _ => 0,
    };
    Ok(claimed)
}

/// One consumer within a group, on its own connection.
///
/// Reads first drain the records already pending for this consumer (the
/// ones taken over on subscribe), then switch to new records.
pub struct RedisStreamSubscription {
    conn: Option<MultiplexedConnection>,
    topic: String,
    group: String,
    consumer: String,
    block: Duration,
    backlog_cursor: Option<String>,
}

impl RedisStreamSubscription {
    fn read_failed(&self, e: RedisError) -> BrokerError {
        BrokerError::ReadFailed {
            topic: self.topic.clone(),
            reason: e.to_string(),
        }
    }

    fn decode(&self, entry: &StreamId) -> Result<BrokerMessage, BrokerError> {
        let offset = MessageOffset::new(entry.id.clone());
        let key: String = entry.get(KEY_FIELD).ok_or_else(|| BrokerError::Malformed {
            offset: offset.clone(),
            reason: format!("missing '{}' field", KEY_FIELD),
        })?;
        let payload: String = entry
            .get(PAYLOAD_FIELD)
            .ok_or_else(|| BrokerError::Malformed {
                offset: offset.clone(),
                reason: format!("missing '{}' field", PAYLOAD_FIELD),
            })?;
        Ok(BrokerMessage {
            key,
            payload,
            offset,
        })
    }

    async fn ack(&mut self, message: &BrokerMessage) -> Result<i64, BrokerError> {
        let conn = self.conn.as_mut().ok_or(BrokerError::Closed)?;
        conn.xack(&self.topic, &self.group, &[message.offset.as_str()])
            .await
            .map_err(|e: RedisError| BrokerError::CommitFailed {
                offset: message.offset.clone(),
                reason: e.to_string(),
            })
    }

    async fn read_once(&mut self, id: &str, block: bool) -> Result<Option<StreamId>, BrokerError> {
        let mut opts = StreamReadOptions::default()
            .group(&self.group, &self.consumer)
            .count(1);
        if block {
            opts = opts.block(self.block.as_millis() as usize);
        }

        let conn = self.conn.as_mut().ok_or(BrokerError::Closed)?;
        let reply: Result<Option<StreamReadReply>, RedisError> =
            conn.xread_options(&[self.topic.as_str()], &[id], &opts).await;
        let reply = reply.map_err(|e| self.read_failed(e))?;

        Ok(reply
            .and_then(|r| r.keys.into_iter().next())
            .and_then(|k| k.ids.into_iter().next()))
    }
}

#[async_trait]
impl Subscription for RedisStreamSubscription {
    async fn read_next(&mut self) -> Result<BrokerMessage, BrokerError> {
        if let Some(cursor) = self.backlog_cursor.clone() {
            match self.read_once(&cursor, false).await? {
                Some(entry) => {
                    self.backlog_cursor = Some(entry.id.clone());
                    return self.decode(&entry);
                }
                None => self.backlog_cursor = None,
            }
        }

        loop {
            if let Some(entry) = self.read_once(">", true).await? {
                return self.decode(&entry);
            }
            tracing::trace!(topic = %self.topic, group = %self.group, "Read timed out, polling again");
        }
    }

    async fn commit(&mut self, message: &BrokerMessage) -> Result<(), BrokerError> {
        if self.ack(message).await? == 0 {
            return Err(BrokerError::CommitFailed {
                offset: message.offset.clone(),
                reason: "record was not pending for this group".to_string(),
            });
        }
        Ok(())
    }

    async fn skip(&mut self, message: &BrokerMessage) -> Result<(), BrokerError> {
        // XACK is per id; an unacknowledged record stays pending.
        self.ack(message).await?;
        tracing::trace!(
            topic = %self.topic,
            group = %self.group,
            offset = %message.offset,
            "Record retired"
        );
        Ok(())
    }

    async fn close(&mut self) {
        if self.conn.take().is_some() {
            tracing::debug!(
                topic = %self.topic,
                group = %self.group,
                consumer = %self.consumer,
                "Subscription closed"
            );
        }
    }
}
