//! EventSubClient port - Interface to the provider's subscription API.
//!
//! The reconciler only needs to list, create and delete subscriptions. How
//! the adapter authenticates (app access token) and talks HTTP is its own
//! business.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::domain::subscription::{Condition, RegisteredSubscription, Transport};

/// Port for managing EventSub subscriptions.
///
/// Every method either returns what the provider reported on a success
/// status, or a [`ProviderError`] carrying the provider's status and message.
#[async_trait]
pub trait EventSubClient: Send + Sync {
    /// Fetch one page of subscriptions registered for `user_id`.
    ///
    /// Pass the previous page's cursor as `after` to continue.
    async fn list_subscriptions(
        &self,
        user_id: &str,
        after: Option<&str>,
    ) -> Result<SubscriptionPage, ProviderError>;

    /// Register a new subscription. Success is `202 Accepted`.
    async fn create_subscription(
        &self,
        request: CreateSubscriptionRequest,
    ) -> Result<(), ProviderError>;

    /// Remove a subscription by ID. Success is `204 No Content`.
    async fn delete_subscription(&self, subscription_id: &str) -> Result<(), ProviderError>;
}

/// One page of a subscription listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionPage {
    pub subscriptions: Vec<RegisteredSubscription>,

    /// Cursor for the next page; `None` on the last page.
    pub cursor: Option<String>,
}

/// Request body for creating a subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateSubscriptionRequest {
    #[serde(rename = "type")]
    pub subscription_type: String,
    pub version: String,
    pub condition: Condition,
    pub transport: Transport,
}

/// The provider could not be reached or answered with a failure status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// Non-success HTTP status with the provider's error message.
    #[error("got response {status} from EventSub API: {message}")]
    Api { status: u16, message: String },

    /// App access token could not be obtained.
    #[error("failed to obtain app access token: {0}")]
    Authentication(String),

    /// Network or protocol failure before a response was received.
    #[error("EventSub API request failed: {0}")]
    Transport(String),

    /// Response body could not be decoded.
    #[error("unexpected EventSub API response: {0}")]
    Decode(String),
}

impl ProviderError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        ProviderError::Api {
            status,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        ProviderError::Transport(message.into())
    }

    pub fn decode(message: impl Into<String>) -> Self {
        ProviderError::Decode(message.into())
    }

    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            ProviderError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
