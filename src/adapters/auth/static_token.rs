//! Static bearer token validator.
//!
//! The service has a single operator, the broadcaster, who holds a token
//! configured at deploy time. Any other token is rejected.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

use crate::domain::access::{AccessError, Principal};
use crate::ports::AccessValidator;

/// Validates bearer tokens against the configured broadcaster token.
pub struct StaticTokenValidator {
    broadcaster_token: SecretString,
    broadcaster_name: String,
}

impl StaticTokenValidator {
    /// `broadcaster_name` becomes the principal's name, normally the channel login.
    pub fn new(broadcaster_token: SecretString, broadcaster_name: impl Into<String>) -> Self {
        Self {
            broadcaster_token,
            broadcaster_name: broadcaster_name.into(),
        }
    }
}

#[async_trait]
impl AccessValidator for StaticTokenValidator {
    async fn validate(&self, token: &str) -> Result<Principal, AccessError> {
        let expected = self.broadcaster_token.expose_secret().as_bytes();
        if expected.is_empty() || token.is_empty() {
            return Err(AccessError::InvalidToken);
        }

        // ct_eq on unequal lengths returns false without comparing contents
        if bool::from(expected.ct_eq(token.as_bytes())) {
            Ok(Principal::broadcaster(self.broadcaster_name.clone()))
        } else {
            Err(AccessError::InvalidToken)
        }
    }
}
