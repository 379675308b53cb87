//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid Redis URL format")]
    InvalidRedisUrl,

    #[error("Invalid broker URL format")]
    InvalidBrokerUrl,

    #[error("Timeout must be between 1 and 300 seconds")]
    InvalidTimeout,

    #[error("Broker block interval must be between 1 and 60000 ms")]
    InvalidBlockInterval,

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),
}
