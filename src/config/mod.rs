//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `HOOKS` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use eventsub_hooks::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Callback URL is {}", config.server.callback_url());
//! ```

mod auth;
mod error;
mod redis;
mod server;
mod twitch;

pub use auth::AuthConfig;
pub use error::{ConfigError, ValidationError};
pub use redis::RedisConfig;
pub use server::{Environment, ServerConfig};
pub use twitch::TwitchConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (bind address, environment, public origin)
    #[serde(default)]
    pub server: ServerConfig,

    /// Twitch application credentials and monitored channel
    pub twitch: TwitchConfig,

    /// Redis configuration (event pub/sub)
    pub redis: RedisConfig,

    /// Admin route credentials
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `HOOKS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `HOOKS__SERVER__PORT=5004` -> `server.port = 5004`
    /// - `HOOKS__TWITCH__CLIENT_ID=...` -> `twitch.client_id = ...`
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
                    .prefix("HOOKS")
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
        self.server.validate()?;
        self.twitch.validate()?;
        self.redis.validate()?;
        self.auth.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
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

    /// Helper to set environment variables for testing
    /// Uses double underscores to separate nested config values
    fn set_minimal_env() {
        env::set_var("HOOKS__TWITCH__CHANNEL_NAME", "goldenvcr");
        env::set_var("HOOKS__TWITCH__CLIENT_ID", "my-client-id");
        env::set_var("HOOKS__TWITCH__CLIENT_SECRET", "my-client-secret");
        env::set_var("HOOKS__TWITCH__WEBHOOK_SECRET", "my-cool-webhook-secret");
        env::set_var("HOOKS__REDIS__URL", "redis://localhost:6379");
        env::set_var("HOOKS__AUTH__BROADCASTER_TOKEN", "s3cret-admin-token");
    }

    /// Helper to clear environment variables after testing
    fn clear_env() {
        env::remove_var("HOOKS__TWITCH__CHANNEL_NAME");
        env::remove_var("HOOKS__TWITCH__CHANNEL_USER_ID");
        env::remove_var("HOOKS__TWITCH__CLIENT_ID");
        env::remove_var("HOOKS__TWITCH__CLIENT_SECRET");
        env::remove_var("HOOKS__TWITCH__WEBHOOK_SECRET");
        env::remove_var("HOOKS__REDIS__URL");
        env::remove_var("HOOKS__AUTH__BROADCASTER_TOKEN");
        env::remove_var("HOOKS__SERVER__PORT");
        env::remove_var("HOOKS__SERVER__ENVIRONMENT");
        env::remove_var("HOOKS__SERVER__ORIGIN");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.twitch.channel_name, "goldenvcr");
        assert_eq!(config.twitch.client_id, "my-client-id");
        assert_eq!(config.twitch.webhook_secret.expose_secret(), "my-cool-webhook-secret");
        assert_eq!(config.redis.url, "redis://localhost:6379");
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5004);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.server.callback_url(), "http://localhost:5004/callback");
        assert_eq!(config.twitch.api_base_url, "https://api.twitch.tv/helix");
        assert_eq!(config.twitch.id_base_url, "https://id.twitch.tv");
        assert_eq!(config.twitch.channel_user_id(), None);
        assert_eq!(config.redis.channel, "twitch-events");
    }

    #[test]
    fn test_missing_required_value_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::remove_var("HOOKS__TWITCH__CLIENT_SECRET");
        let result = AppConfig::load();
        clear_env();

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn test_production_requires_https_origin() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("HOOKS__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
        assert_eq!(config.validate(), Err(ValidationError::OriginMustBeHttps));
    }

    #[test]
    fn test_custom_origin_and_channel_user_id() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("HOOKS__SERVER__ORIGIN", "https://goldenvcr.com/api/hooks");
        env::set_var("HOOKS__TWITCH__CHANNEL_USER_ID", "1337");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(
            config.server.callback_url(),
            "https://goldenvcr.com/api/hooks/callback"
        );
        assert_eq!(config.twitch.channel_user_id(), Some("1337"));
    }
}
