//! In-memory broker for tests and local development.
//!
//! Mirrors the consumer-group semantics of the Redis Streams adapter:
//! one delivery cursor per group shared by its consumers, a pending list of
//! delivered-but-uncommitted records, and hand-over of a closed consumer's
//! pending records to the next reader in the group.
//!
//! Skipped records leave the pending list without being recorded as
//! committed. Every commit is recorded and send or commit failures can be
//! injected, so tests can assert on delivery guarantees.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::ports::{
    BrokerConsumer, BrokerError, BrokerMessage, BrokerProducer, MessageOffset, StartOffset,
    Subscription,
};

#[derive(Debug, Clone)]
struct Record {
    key: String,
    payload: String,
}

#[derive(Debug, Default)]
struct Group {
    /// Index of the next never-delivered record.
    cursor: usize,
    /// Delivered but uncommitted, by record index, with the consumer holding it.
    pending: BTreeMap<usize, u64>,
    /// Pending records released by a closed consumer, redelivered first.
    released: VecDeque<usize>,
    committed: Vec<usize>,
}

#[derive(Debug, Default)]
struct Topic {
    records: Vec<Record>,
    groups: HashMap<String, Group>,
}

#[derive(Debug, Default)]
struct State {
    topics: HashMap<String, Topic>,
    next_consumer: u64,
    fail_sends: bool,
    fail_commits: bool,
}

/// Process-local broker implementing both broker ports.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBroker {
    state: Arc<Mutex<State>>,
    notify: Arc<Notify>,
}

impl InMemoryBroker {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        lock_state(&self.state)
    }

    // === Test Helpers ===

    /// Every `(key, payload)` appended to `topic`, in order.
    pub fn records(&self, topic: &str) -> Vec<(String, String)> {
        self.lock()
            .topics
            .get(topic)
            .map(|t| {
                t.records
                    .iter()
                    .map(|r| (r.key.clone(), r.payload.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Offsets committed by `group` on `topic`, in commit order.
    pub fn committed(&self, topic: &str, group: &str) -> Vec<MessageOffset> {
        self.lock()
            .topics
            .get(topic)
            .and_then(|t| t.groups.get(group))
            .map(|g| g.committed.iter().map(|i| offset_of(*i)).collect())
            .unwrap_or_default()
    }

    /// Number of delivered-but-uncommitted records for `group`.
    pub fn pending_count(&self, topic: &str, group: &str) -> usize {
        self.lock()
            .topics
            .get(topic)
            .and_then(|t| t.groups.get(group))
            .map(|g| g.pending.len())
            .unwrap_or(0)
    }

    /// True once `group` exists on `topic`.
    pub fn has_group(&self, topic: &str, group: &str) -> bool {
        self.lock()
            .topics
            .get(topic)
            .map(|t| t.groups.contains_key(group))
            .unwrap_or(false)
    }

    /// Make every subsequent `send` fail.
    pub fn fail_sends(&self, fail: bool) {
        self.lock().fail_sends = fail;
    }

    /// Make every subsequent `commit` fail.
    pub fn fail_commits(&self, fail: bool) {
        self.lock().fail_commits = fail;
    }
}

fn lock_state(state: &Mutex<State>) -> MutexGuard<'_, State> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn offset_of(index: usize) -> MessageOffset {
    MessageOffset::new(index.to_string())
}

#[async_trait]
impl BrokerProducer for InMemoryBroker {
    async fn send(&self, topic: &str, key: &str, payload: &str) -> Result<(), BrokerError> {
        {
            let mut state = self.lock();
            if state.fail_sends {
                return Err(BrokerError::PublishFailed {
                    topic: topic.to_string(),
                    reason: "injected failure".to_string(),
                });
            }
            state
                .topics
                .entry(topic.to_string())
                .or_default()
                .records
                .push(Record {
                    key: key.to_string(),
                    payload: payload.to_string(),
                });
        }
        self.notify.notify_waiters();
        Ok(())
    }
}

#[async_trait]
impl BrokerConsumer for InMemoryBroker {
    async fn subscribe(
        &self,
        topic: &str,
        group: &str,
        from: StartOffset,
    ) -> Result<Box<dyn Subscription>, BrokerError> {
        let consumer = {
            let mut state = self.lock();
            state.next_consumer += 1;
            let consumer = state.next_consumer;

            let topic_state = state.topics.entry(topic.to_string()).or_default();
            let latest = topic_state.records.len();
            topic_state
                .groups
                .entry(group.to_string())
                .or_insert_with(|| Group {
                    cursor: match from {
                        StartOffset::Latest => latest,
                        StartOffset::Earliest => 0,
                    },
                    ..Group::default()
                });
            consumer
        };

        Ok(Box::new(InMemorySubscription {
            state: Arc::clone(&self.state),
            notify: Arc::clone(&self.notify),
            topic: topic.to_string(),
            group: group.to_string(),
            consumer,
            closed: false,
        }))
    }
}

/// Subscription handle returned by [`InMemoryBroker`].
#[derive(Debug)]
pub struct InMemorySubscription {
    state: Arc<Mutex<State>>,
    notify: Arc<Notify>,
    topic: String,
    group: String,
    consumer: u64,
    closed: bool,
}

impl InMemorySubscription {
    /// Claim the next deliverable record, if any, without awaiting.
    fn try_take(&self) -> Option<BrokerMessage> {
        let mut state = lock_state(&self.state);
        let topic = state.topics.get_mut(&self.topic)?;
        let group = topic.groups.get_mut(&self.group)?;

        let index = match group.released.pop_front() {
            Some(index) => index,
            None if group.cursor < topic.records.len() => {
                group.cursor += 1;
                group.cursor - 1
            }
            None => return None,
        };
        group.pending.insert(index, self.consumer);

        let record = &topic.records[index];
        Some(BrokerMessage {
            key: record.key.clone(),
            payload: record.payload.clone(),
            offset: offset_of(index),
        })
    }

    /// Take `message` off this consumer's pending list, recording it as
    /// committed when `commit` is set.
    fn settle(&self, message: &BrokerMessage, commit: bool) -> Result<(), BrokerError> {
        let commit_failed = |reason: &str| BrokerError::CommitFailed {
            offset: message.offset.clone(),
            reason: reason.to_string(),
        };
        if self.closed {
            return Err(BrokerError::Closed);
        }
        let index: usize = message
            .offset
            .as_str()
            .parse()
            .map_err(|_| commit_failed("unknown offset"))?;

        let mut state = lock_state(&self.state);
        if commit && state.fail_commits {
            return Err(commit_failed("injected failure"));
        }
        let group = state
            .topics
            .get_mut(&self.topic)
            .and_then(|t| t.groups.get_mut(&self.group))
            .ok_or_else(|| commit_failed("unknown group"))?;
        if group.pending.get(&index) != Some(&self.consumer) {
            return Err(commit_failed("record is not pending for this consumer"));
        }
        group.pending.remove(&index);
        if commit {
            group.committed.push(index);
        }
        Ok(())
    }

    fn release(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        let mut state = lock_state(&self.state);
        if let Some(group) = state
            .topics
            .get_mut(&self.topic)
            .and_then(|t| t.groups.get_mut(&self.group))
        {
            let held: Vec<usize> = group
                .pending
                .iter()
                .filter(|(_, holder)| **holder == self.consumer)
                .map(|(index, _)| *index)
                .collect();
            for index in held {
                group.pending.remove(&index);
                group.released.push_back(index);
            }
        }
        drop(state);
        self.notify.notify_waiters();
    }
}

#[async_trait]
impl Subscription for InMemorySubscription {
    async fn read_next(&mut self) -> Result<BrokerMessage, BrokerError> {
        loop {
            if self.closed {
                return Err(BrokerError::Closed);
            }
            // Register before checking so a send between the check and the
            // await still wakes us.
            let notified = self.notify.notified();
            if let Some(message) = self.try_take() {
                return Ok(message);
            }
            notified.await;
        }
    }

    async fn commit(&mut self, message: &BrokerMessage) -> Result<(), BrokerError> {
        self.settle(message, true)
    }

    async fn skip(&mut self, message: &BrokerMessage) -> Result<(), BrokerError> {
        self.settle(message, false)
    }

    async fn close(&mut self) {
        self.release();
    }
}

impl Drop for InMemorySubscription {
    fn drop(&mut self) {
        self.release();
    }
}
