//! Connect Four Live - turn-based game sessions with live spectators
//!
//! Canonical session state lives in an external key-value store; every
//! change is broadcast through a message broker, and a stream relay per
//! spectator forwards a session's broadcasts to one live connection.

pub mod adapters;
pub mod application;
pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod domain;
pub mod ports;
