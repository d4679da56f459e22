//! Webhook error types for EventSub deliveries.
//!
//! Status codes determine the provider's redelivery behavior: 4xx responses
//! are not retried, 5xx responses are redelivered on the provider's schedule.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that occur while processing an EventSub delivery.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// HMAC signature missing or did not match.
    #[error("Signature verification failed")]
    SignatureVerificationFailed,

    /// Body could not be decoded as an EventSub envelope.
    #[error("Malformed delivery: {0}")]
    MalformedDelivery(String),

    /// Notification carried no `event` object.
    #[error("Notification for {subscription_type} has no event payload")]
    MissingEvent { subscription_type: String },

    /// No canonical mapping exists for the subscription type.
    #[error("Unsupported event type: {subscription_type} v{version}")]
    UnsupportedEvent {
        subscription_type: String,
        version: String,
    },

    /// Event JSON did not match the shape expected for its type.
    #[error("Invalid {subscription_type} event: {message}")]
    InvalidEvent {
        subscription_type: String,
        message: String,
    },

    /// The downstream publisher rejected the canonical event.
    #[error("Failed to publish event: {0}")]
    DownstreamPublishFailed(String),
}

impl WebhookError {
    pub fn malformed(message: impl Into<String>) -> Self {
        WebhookError::MalformedDelivery(message.into())
    }

    pub fn unsupported(subscription_type: impl Into<String>, version: impl Into<String>) -> Self {
        WebhookError::UnsupportedEvent {
            subscription_type: subscription_type.into(),
            version: version.into(),
        }
    }

    pub fn invalid_event(subscription_type: impl Into<String>, message: impl Into<String>) -> Self {
        WebhookError::InvalidEvent {
            subscription_type: subscription_type.into(),
            message: message.into(),
        }
    }

    /// Returns true if the provider should redeliver.
    pub fn is_retryable(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// Stable machine-readable code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            WebhookError::SignatureVerificationFailed => "SIGNATURE_VERIFICATION_FAILED",
            WebhookError::MalformedDelivery(_) => "MALFORMED_DELIVERY",
            WebhookError::MissingEvent { .. } => "MISSING_EVENT",
            WebhookError::UnsupportedEvent { .. } => "UNSUPPORTED_EVENT",
            WebhookError::InvalidEvent { .. } => "INVALID_EVENT",
            WebhookError::DownstreamPublishFailed(_) => "DOWNSTREAM_PUBLISH_FAILED",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            // Authenticity and format problems - don't retry
            WebhookError::SignatureVerificationFailed | WebhookError::MalformedDelivery(_) => {
                StatusCode::BAD_REQUEST
            }

            // Handler failures - provider redelivers
            WebhookError::MissingEvent { .. }
            | WebhookError::UnsupportedEvent { .. }
            | WebhookError::InvalidEvent { .. }
            | WebhookError::DownstreamPublishFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
