//! EventSub delivery envelope and headers.

use serde::Deserialize;
use serde_json::value::RawValue;

use crate::domain::subscription::Condition;

use super::errors::WebhookError;

pub const HEADER_MESSAGE_ID: &str = "Twitch-Eventsub-Message-Id";
pub const HEADER_MESSAGE_TIMESTAMP: &str = "Twitch-Eventsub-Message-Timestamp";
pub const HEADER_MESSAGE_SIGNATURE: &str = "Twitch-Eventsub-Message-Signature";
pub const HEADER_MESSAGE_TYPE: &str = "Twitch-Eventsub-Message-Type";

/// The EventSub headers of a delivery, as sent.
///
/// Absent headers stay `None`; signature verification fails on them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryHeaders {
    pub message_id: Option<String>,
    pub timestamp: Option<String>,
    pub signature: Option<String>,
    pub message_type: Option<String>,
}

impl DeliveryHeaders {
    pub fn kind(&self) -> MessageType {
        MessageType::from_header(self.message_type.as_deref())
    }
}

/// Value of the `Twitch-Eventsub-Message-Type` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Verification,
    Notification,
    Revocation,
}

impl MessageType {
    /// Missing or unrecognized values are treated as notifications.
    pub fn from_header(value: Option<&str>) -> Self {
        match value {
            Some("webhook_callback_verification") => MessageType::Verification,
            Some("revocation") => MessageType::Revocation,
            _ => MessageType::Notification,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MessageType::Verification => "webhook_callback_verification",
            MessageType::Notification => "notification",
            MessageType::Revocation => "revocation",
        }
    }
}

/// The `subscription` object carried by every delivery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SubscriptionDescriptor {
    #[serde(default)]
    pub id: String,

    #[serde(rename = "type", default)]
    pub subscription_type: String,

    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub condition: Condition,
}

impl SubscriptionDescriptor {
    /// Twitch user ID of the channel the subscription is scoped to.
    pub fn channel_user_id(&self) -> Option<&str> {
        self.condition
            .broadcaster_user_id
            .as_deref()
            .or(self.condition.to_broadcaster_user_id.as_deref())
            .filter(|id| !id.is_empty())
    }
}

/// Decoded request body of a delivery.
#[derive(Debug, Deserialize)]
pub struct DeliveryEnvelope {
    pub subscription: SubscriptionDescriptor,

    #[serde(default)]
    pub challenge: Option<String>,

    #[serde(default)]
    pub event: Option<Box<RawValue>>,
}

impl DeliveryEnvelope {
    pub fn from_slice(body: &[u8]) -> Result<Self, WebhookError> {
        serde_json::from_slice(body).map_err(|e| WebhookError::malformed(e.to_string()))
    }

    /// The challenge to echo back, if this is a verification request.
    pub fn challenge(&self) -> Option<&str> {
        self.challenge.as_deref().filter(|c| !c.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_type_parses_known_values() {
        assert_eq!(
            MessageType::from_header(Some("webhook_callback_verification")),
            MessageType::Verification
        );
        assert_eq!(
            MessageType::from_header(Some("notification")),
            MessageType::Notification
        );
        assert_eq!(
            MessageType::from_header(Some("revocation")),
            MessageType::Revocation
        );
    }

    #[test]
    fn message_type_defaults_to_notification() {
        assert_eq!(MessageType::from_header(None), MessageType::Notification);
        assert_eq!(
            MessageType::from_header(Some("something_new")),
            MessageType::Notification
        );
    }

    #[test]
    fn decodes_challenge_envelope() {
        let body = br#"{
            "challenge": "pogchamp-kappa-360noscope-vohiyo",
            "subscription": {
                "id": "f1c2a387-161a-49f9-a165-0f21d7a4e1c4",
                "status": "webhook_callback_verification_pending",
                "type": "channel.follow",
                "version": "2",
                "cost": 1,
                "condition": {"broadcaster_user_id": "12826", "moderator_user_id": "12826"},
                "transport": {"method": "webhook", "callback": "https://example.com/callback"},
                "created_at": "2019-11-16T10:11:12.634234626Z"
            }
        }"#;
        let envelope = DeliveryEnvelope::from_slice(body).unwrap();
        assert_eq!(envelope.challenge(), Some("pogchamp-kappa-360noscope-vohiyo"));
        assert_eq!(envelope.subscription.subscription_type, "channel.follow");
        assert!(envelope.event.is_none());
    }

    #[test]
    fn empty_challenge_is_ignored() {
        let body = br#"{"subscription": {"type": "stream.online", "version": "1"}, "challenge": "", "event": {}}"#;
        let envelope = DeliveryEnvelope::from_slice(body).unwrap();
        assert_eq!(envelope.challenge(), None);
    }

    #[test]
    fn event_is_kept_raw() {
        let body = br#"{"subscription": {"type": "stream.offline", "version": "1"}, "event": {"broadcaster_user_id": "1337"}}"#;
        let envelope = DeliveryEnvelope::from_slice(body).unwrap();
        assert_eq!(
            envelope.event.unwrap().get(),
            r#"{"broadcaster_user_id": "1337"}"#
        );
    }

    #[test]
    fn invalid_json_is_malformed() {
        let result = DeliveryEnvelope::from_slice(b"not json");
        assert!(matches!(result, Err(WebhookError::MalformedDelivery(_))));
    }

    #[test]
    fn missing_subscription_is_malformed() {
        let result = DeliveryEnvelope::from_slice(br#"{"challenge": "abc"}"#);
        assert!(matches!(result, Err(WebhookError::MalformedDelivery(_))));
    }

    #[test]
    fn channel_user_id_falls_back_to_raid_target() {
        let descriptor = SubscriptionDescriptor {
            subscription_type: "channel.raid".to_string(),
            condition: Condition {
                from_broadcaster_user_id: Some(String::new()),
                to_broadcaster_user_id: Some("1337".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(descriptor.channel_user_id(), Some("1337"));
    }
}
