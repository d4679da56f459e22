//! Subscriptions as registered with the provider.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::condition::Condition;

/// Transport method Twitch uses for HTTP push deliveries.
pub const WEBHOOK_METHOD: &str = "webhook";

/// How the provider delivers events for a subscription.
///
/// `Debug` redacts the secret so requests can be logged.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transport {
    pub method: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback: Option<String>,

    /// Only ever sent on create; the provider never echoes it back.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

impl Transport {
    pub fn webhook(callback: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            method: WEBHOOK_METHOD.to_string(),
            callback: Some(callback.into()),
            secret: Some(secret.into()),
        }
    }
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("method", &self.method)
            .field("callback", &self.callback)
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// A subscription read back from the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredSubscription {
    pub id: String,

    #[serde(rename = "type")]
    pub subscription_type: String,

    pub version: String,

    /// Provider-reported state, e.g. `enabled` or
    /// `webhook_callback_verification_pending`.
    pub status: String,

    #[serde(default)]
    pub condition: Condition,

    pub transport: Transport,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl RegisteredSubscription {
    /// True iff the subscription pushes to the given webhook callback URL.
    ///
    /// Only owned subscriptions are ever matched, reported or deleted.
    pub fn is_owned_by(&self, callback_url: &str) -> bool {
        self.transport.method == WEBHOOK_METHOD
            && self.transport.callback.as_deref() == Some(callback_url)
    }
}
