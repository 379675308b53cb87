//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the game core and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `KeyValueStore` - Raw get/set/del of byte blobs
//! - `SessionRepository` - Session aggregate load/save/delete
//!
//! ## Broadcast Ports
//!
//! - `BrokerProducer` - Keyed append to a topic
//! - `BrokerConsumer` / `Subscription` - Consumer-group reads with manual commit
//! - `EventPublisher` - Session-addressed broadcast of rendered updates
//! - `ClientSink` - The live connection a relay forwards to

mod client_sink;
mod event_publisher;
mod key_value_store;
mod message_broker;
mod session_repository;

pub use client_sink::{ClientSink, SinkError};
pub use event_publisher::EventPublisher;
pub use key_value_store::{KeyValueStore, StoreError};
pub use message_broker::{
    BrokerConsumer, BrokerError, BrokerMessage, BrokerProducer, MessageOffset, StartOffset,
    Subscription,
};
pub use session_repository::SessionRepository;
