//! Event publisher adapters.
//!
//! - `BrokerEventPublisher` - Session-keyed records on a broker topic
//! - `RecordingEventPublisher` - Captures messages for test assertions

mod broker_publisher;
mod recording;

pub use broker_publisher::BrokerEventPublisher;
pub use recording::RecordingEventPublisher;
