//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CONNECT_FOUR` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use connect_four_live::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Broadcasting on stream {}", config.broker.topic);
//! ```

mod broker;
mod error;
mod logging;
mod redis;

pub use broker::BrokerConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::{LogFormat, LoggingConfig};
pub use redis::RedisConfig;

use secrecy::SecretString;
use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Session store (Redis)
    pub redis: RedisConfig,

    /// Broadcast broker (Redis Streams)
    #[serde(default)]
    pub broker: BrokerConfig,

    /// Tracing output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CONNECT_FOUR` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CONNECT_FOUR__REDIS__URL=redis://...` -> `redis.url`
    /// - `CONNECT_FOUR__BROKER__TOPIC=broadcast` -> `broker.topic`
    /// - `CONNECT_FOUR__LOGGING__FORMAT=json` -> `logging.format`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CONNECT_FOUR")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.redis.validate()?;
        self.broker.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// URL of the broker, falling back to the store's Redis
    pub fn broker_url(&self) -> &SecretString {
        self.broker.url.as_ref().unwrap_or(&self.redis.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("CONNECT_FOUR__REDIS__URL", "redis://localhost:6379");
    }

    fn clear_env() {
        env::remove_var("CONNECT_FOUR__REDIS__URL");
        env::remove_var("CONNECT_FOUR__REDIS__TIMEOUT_SECS");
        env::remove_var("CONNECT_FOUR__BROKER__URL");
        env::remove_var("CONNECT_FOUR__BROKER__TOPIC");
        env::remove_var("CONNECT_FOUR__LOGGING__FORMAT");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.redis.url.expose_secret(), "redis://localhost:6379");
        assert_eq!(config.broker.topic, "broadcast");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_broker_url_falls_back_to_redis() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.broker_url().expose_secret(), "redis://localhost:6379");
    }

    #[test]
    fn test_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("CONNECT_FOUR__BROKER__URL", "redis://broker:6379");
        env::set_var("CONNECT_FOUR__BROKER__TOPIC", "games");
        env::set_var("CONNECT_FOUR__REDIS__TIMEOUT_SECS", "12");
        env::set_var("CONNECT_FOUR__LOGGING__FORMAT", "json");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.broker_url().expose_secret(), "redis://broker:6379");
        assert_eq!(config.broker.topic, "games");
        assert_eq!(config.redis.timeout_secs, 12);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_missing_redis_url_fails() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        assert!(AppConfig::load().is_err());
    }
}
