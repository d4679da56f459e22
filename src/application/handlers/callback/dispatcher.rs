//! WebhookDispatcher - Command handler for inbound EventSub deliveries.

use std::sync::Arc;

use crate::domain::webhook::{DeliveryEnvelope, DeliveryHeaders, MessageType, WebhookError};
use crate::ports::{EventSink, SignatureVerifier};

/// Command to process one delivery.
#[derive(Debug, Clone)]
pub struct HandleDeliveryCommand {
    pub headers: DeliveryHeaders,
    /// Request body exactly as received.
    pub body: Vec<u8>,
}

/// How a delivery was answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Verification request; the challenge must be echoed verbatim.
    Challenge(String),
    /// Event passed to the sink.
    Handled,
    /// Provider revoked the subscription; acknowledged only.
    Revoked,
}

/// Verifies, decodes and routes EventSub deliveries.
///
/// Processing is synchronous: the sink has finished with the event before
/// `handle` returns. Failures are never retried here; the provider redelivers
/// anything not answered with a 2xx.
pub struct WebhookDispatcher {
    verifier: Arc<dyn SignatureVerifier>,
    sink: Arc<dyn EventSink>,
}

impl WebhookDispatcher {
    pub fn new(verifier: Arc<dyn SignatureVerifier>, sink: Arc<dyn EventSink>) -> Self {
        Self { verifier, sink }
    }

    pub async fn handle(&self, cmd: HandleDeliveryCommand) -> Result<DeliveryOutcome, WebhookError> {
        let message_id = cmd.headers.message_id.as_deref().unwrap_or_default();

        // 1. Authenticate before looking at the body
        if !self.verifier.verify(&cmd.headers, &cmd.body) {
            tracing::warn!(message_id, "Rejected EventSub delivery with invalid signature");
            return Err(WebhookError::SignatureVerificationFailed);
        }

        // 2. Decode the envelope
        let envelope = DeliveryEnvelope::from_slice(&cmd.body).map_err(|e| {
            tracing::warn!(message_id, error = %e, "Failed to decode EventSub delivery");
            e
        })?;
        let subscription = &envelope.subscription;

        // 3. Answer verification challenges regardless of type
        if let Some(challenge) = envelope.challenge() {
            tracing::info!(
                message_id,
                subscription_id = %subscription.id,
                subscription_type = %subscription.subscription_type,
                subscription_version = %subscription.version,
                "Responding to EventSub challenge"
            );
            return Ok(DeliveryOutcome::Challenge(challenge.to_string()));
        }

        if cmd.headers.kind() == MessageType::Revocation {
            tracing::warn!(
                message_id,
                subscription_id = %subscription.id,
                subscription_type = %subscription.subscription_type,
                subscription_version = %subscription.version,
                subscription_status = %subscription.status,
                "EventSub subscription revoked"
            );
            return Ok(DeliveryOutcome::Revoked);
        }

        // 4. Hand the event to the sink
        let event = envelope.event.as_deref().ok_or_else(|| WebhookError::MissingEvent {
            subscription_type: subscription.subscription_type.clone(),
        })?;

        if let Err(e) = self.sink.handle(subscription, event).await {
            tracing::error!(
                message_id,
                subscription_id = %subscription.id,
                subscription_type = %subscription.subscription_type,
                subscription_version = %subscription.version,
                error = %e,
                "Failed to handle EventSub notification"
            );
            return Err(e);
        }

        tracing::debug!(
            message_id,
            subscription_type = %subscription.subscription_type,
            "Handled EventSub notification"
        );
        Ok(DeliveryOutcome::Handled)
    }
}
