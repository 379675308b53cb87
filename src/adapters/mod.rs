//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the game core to external systems:
//! - `storage` - Key-value stores and the session repository
//! - `broker` - Message broker producers and consumer groups
//! - `events` - Event publishers
//! - `client` - Live client connections

pub mod broker;
pub mod client;
pub mod events;
pub mod storage;
