//! Twitch configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

use super::error::ValidationError;

/// Twitch's accepted range for EventSub webhook secrets, in bytes.
const WEBHOOK_SECRET_LEN: std::ops::RangeInclusive<usize> = 10..=100;

/// Twitch application and channel configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TwitchConfig {
    /// Login name of the monitored channel
    pub channel_name: String,

    /// User ID of the monitored channel; resolved from `channel_name` when unset
    #[serde(default)]
    pub channel_user_id: Option<String>,

    /// Application client ID
    pub client_id: String,

    /// Application client secret
    pub client_secret: SecretString,

    /// Shared secret Twitch signs webhook deliveries with
    pub webhook_secret: SecretString,

    /// Helix API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Identity service base URL (OAuth endpoints)
    #[serde(default = "default_id_base_url")]
    pub id_base_url: String,
}

impl TwitchConfig {
    /// Configured channel user ID, if non-empty
    pub fn channel_user_id(&self) -> Option<&str> {
        self.channel_user_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Validate Twitch configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.channel_name.is_empty() {
            return Err(ValidationError::MissingRequired("TWITCH__CHANNEL_NAME"));
        }
        if self.client_id.is_empty() {
            return Err(ValidationError::MissingRequired("TWITCH__CLIENT_ID"));
        }
        if self.client_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("TWITCH__CLIENT_SECRET"));
        }

        let secret_len = self.webhook_secret.expose_secret().len();
        if secret_len == 0 {
            return Err(ValidationError::MissingRequired("TWITCH__WEBHOOK_SECRET"));
        }
        if !WEBHOOK_SECRET_LEN.contains(&secret_len) {
            return Err(ValidationError::InvalidWebhookSecretLength(secret_len));
        }

        if Url::parse(&self.api_base_url).is_err() {
            return Err(ValidationError::InvalidUrl("TWITCH__API_BASE_URL"));
        }
        if Url::parse(&self.id_base_url).is_err() {
            return Err(ValidationError::InvalidUrl("TWITCH__ID_BASE_URL"));
        }
        Ok(())
    }
}

fn default_api_base_url() -> String {
    "https://api.twitch.tv/helix".to_string()
}

fn default_id_base_url() -> String {
    "https://id.twitch.tv".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> TwitchConfig {
        TwitchConfig {
            channel_name: "goldenvcr".to_string(),
            channel_user_id: None,
            client_id: "my-client-id".to_string(),
            client_secret: SecretString::new("my-client-secret".to_string()),
            webhook_secret: SecretString::new("my-cool-webhook-secret".to_string()),
            api_base_url: default_api_base_url(),
            id_base_url: default_id_base_url(),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_validation_missing_channel_name() {
        let config = TwitchConfig {
            channel_name: String::new(),
            ..valid()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("TWITCH__CHANNEL_NAME"))
        );
    }

    #[test]
    fn test_validation_missing_client_secret() {
        let config = TwitchConfig {
            client_secret: SecretString::new(String::new()),
            ..valid()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("TWITCH__CLIENT_SECRET"))
        );
    }

    #[test]
    fn test_validation_webhook_secret_length() {
        let short = TwitchConfig {
            webhook_secret: SecretString::new("too-short".to_string()),
            ..valid()
        };
        assert_eq!(
            short.validate(),
            Err(ValidationError::InvalidWebhookSecretLength(9))
        );

        let long = TwitchConfig {
            webhook_secret: SecretString::new("x".repeat(101)),
            ..valid()
        };
        assert_eq!(
            long.validate(),
            Err(ValidationError::InvalidWebhookSecretLength(101))
        );

        let edge = TwitchConfig {
            webhook_secret: SecretString::new("x".repeat(100)),
            ..valid()
        };
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn test_validation_invalid_api_url() {
        let config = TwitchConfig {
            api_base_url: "not a url".to_string(),
            ..valid()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidUrl("TWITCH__API_BASE_URL"))
        );
    }

    #[test]
    fn test_empty_channel_user_id_is_unset() {
        let config = TwitchConfig {
            channel_user_id: Some(String::new()),
            ..valid()
        };
        assert_eq!(config.channel_user_id(), None);

        let config = TwitchConfig {
            channel_user_id: Some("1337".to_string()),
            ..valid()
        };
        assert_eq!(config.channel_user_id(), Some("1337"));
    }
}
