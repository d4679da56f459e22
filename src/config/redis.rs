//! Redis configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Redis configuration for publishing channel events
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    /// Redis connection URL
    pub url: String,

    /// Pub/sub channel canonical events are published on
    #[serde(default = "default_channel")]
    pub channel: String,
}

impl RedisConfig {
    /// Validate Redis configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("REDIS__URL"));
        }
        if !self.url.starts_with("redis://") && !self.url.starts_with("rediss://") {
            return Err(ValidationError::InvalidRedisUrl);
        }
        if self.channel.is_empty() {
            return Err(ValidationError::MissingRequired("REDIS__CHANNEL"));
        }
        Ok(())
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            channel: default_channel(),
        }
    }
}

fn default_channel() -> String {
    "twitch-events".to_string()
}
