//! EventSink port - Receives verified event notifications.

use async_trait::async_trait;
use serde_json::value::RawValue;

use crate::domain::webhook::{SubscriptionDescriptor, WebhookError};

/// Handles the event carried by a verified notification.
///
/// The dispatcher awaits `handle` before answering the provider, so
/// implementations should finish quickly. Errors are answered with the
/// status from [`WebhookError::status_code`] and are never retried here.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn handle(
        &self,
        subscription: &SubscriptionDescriptor,
        event: &RawValue,
    ) -> Result<(), WebhookError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn EventSink) {}
}
