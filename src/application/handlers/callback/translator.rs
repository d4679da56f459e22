//! EventTranslator - Maps EventSub notifications to canonical channel events.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::value::RawValue;

use crate::domain::webhook::{ChannelEvent, SubscriptionDescriptor, WebhookError};
use crate::ports::{EventPublisher, EventSink};

/// [`EventSink`] that publishes each event as a serialized [`ChannelEvent`].
pub struct EventTranslator {
    publisher: Arc<dyn EventPublisher>,
}

impl EventTranslator {
    pub fn new(publisher: Arc<dyn EventPublisher>) -> Self {
        Self { publisher }
    }
}

#[async_trait]
impl EventSink for EventTranslator {
    async fn handle(
        &self,
        subscription: &SubscriptionDescriptor,
        event: &RawValue,
    ) -> Result<(), WebhookError> {
        let channel_event = ChannelEvent::from_delivery(subscription, event.get(), Utc::now())?;

        let message = channel_event
            .to_bytes()
            .map_err(|e| WebhookError::DownstreamPublishFailed(e.to_string()))?;

        self.publisher
            .publish(message)
            .await
            .map_err(|e| WebhookError::DownstreamPublishFailed(e.to_string()))?;

        tracing::info!(
            event_id = %channel_event.id,
            event_kind = channel_event.kind(),
            channel_user_id = %channel_event.channel_user_id,
            subscription_id = %channel_event.subscription_id,
            "Published channel event"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::subscription::Condition;
    use crate::domain::webhook::{ChannelEventPayload, Viewer};
    use crate::ports::PublishError;
    use std::sync::Mutex;

    #[derive(Default)]
    struct CapturingPublisher {
        messages: Mutex<Vec<Vec<u8>>>,
        fail: bool,
    }

    #[async_trait]
    impl EventPublisher for CapturingPublisher {
        async fn publish(&self, message: Vec<u8>) -> Result<(), PublishError> {
            if self.fail {
                return Err(PublishError::connection("Connection refused"));
            }
            self.messages.lock().unwrap().push(message);
            Ok(())
        }
    }

    fn descriptor(subscription_type: &str, version: &str) -> SubscriptionDescriptor {
        SubscriptionDescriptor {
            id: "f1c2a387-161a-49f9-a165-0f21d7a4e1c4".to_string(),
            subscription_type: subscription_type.to_string(),
            version: version.to_string(),
            status: "enabled".to_string(),
            condition: Condition::for_broadcaster("1337"),
        }
    }

    fn raw(json: &str) -> Box<RawValue> {
        RawValue::from_string(json.to_string()).unwrap()
    }

    #[tokio::test]
    async fn publishes_translated_event() {
        let publisher = Arc::new(CapturingPublisher::default());
        let translator = EventTranslator::new(publisher.clone());

        translator
            .handle(
                &descriptor("channel.follow", "2"),
                &raw(r#"{"user_id":"1234","user_login":"cool_user","user_name":"Cool_User","broadcaster_user_id":"1337","followed_at":"2020-07-15T18:16:11.17106713Z"}"#),
            )
            .await
            .unwrap();

        let messages = publisher.messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        let published: ChannelEvent = serde_json::from_slice(&messages[0]).unwrap();
        assert_eq!(published.channel_user_id, "1337");
        assert_eq!(published.subscription_id, "f1c2a387-161a-49f9-a165-0f21d7a4e1c4");
        assert_eq!(
            published.event,
            ChannelEventPayload::ViewerFollowed {
                viewer: Viewer {
                    user_id: "1234".to_string(),
                    user_login: "cool_user".to_string(),
                    user_name: "Cool_User".to_string(),
                }
            }
        );
    }

    #[tokio::test]
    async fn unsupported_type_is_not_published() {
        let publisher = Arc::new(CapturingPublisher::default());
        let translator = EventTranslator::new(publisher.clone());

        let result = translator
            .handle(&descriptor("channel.ban", "1"), &raw("{}"))
            .await;

        assert!(matches!(result, Err(WebhookError::UnsupportedEvent { .. })));
        assert!(publisher.messages.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn publisher_failure_maps_to_downstream_error() {
        let publisher = Arc::new(CapturingPublisher {
            fail: true,
            ..Default::default()
        });
        let translator = EventTranslator::new(publisher);

        let result = translator
            .handle(&descriptor("stream.offline", "1"), &raw("{}"))
            .await;

        match result {
            Err(WebhookError::DownstreamPublishFailed(message)) => {
                assert!(message.contains("Connection refused"))
            }
            other => panic!("expected downstream failure, got {:?}", other),
        }
    }
}
