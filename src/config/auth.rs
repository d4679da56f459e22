//! Admin authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Credentials for the broadcaster-only admin routes
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Bearer token that grants the broadcaster role
    pub broadcaster_token: SecretString,
}

impl AuthConfig {
    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.broadcaster_token.expose_secret().trim().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__BROADCASTER_TOKEN"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_blank_token() {
        let config = AuthConfig {
            broadcaster_token: SecretString::new("   ".to_string()),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_valid_token() {
        let config = AuthConfig {
            broadcaster_token: SecretString::new("s3cret-admin-token".to_string()),
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = AuthConfig {
            broadcaster_token: SecretString::new("s3cret-admin-token".to_string()),
        };
        assert!(!format!("{:?}", config).contains("s3cret-admin-token"));
    }
}
