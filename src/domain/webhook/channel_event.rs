//! Canonical channel events.
//!
//! Twitch event payloads are specific to each subscription type and version.
//! Downstream consumers receive a [`ChannelEvent`] instead, which names the
//! viewer involved (if any) the same way for every kind of event.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::delivery::SubscriptionDescriptor;
use super::errors::WebhookError;

/// A Twitch user taking part in an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    pub user_id: String,
    pub user_login: String,
    pub user_name: String,
}

/// What happened on the channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum ChannelEventPayload {
    ChannelUpdated {
        title: String,
        category_id: String,
        category_name: String,
    },
    StreamStarted {
        started_at: Option<String>,
    },
    StreamEnded,
    HypeTrainStarted {
        level: Option<u32>,
        total: u64,
        goal: u64,
    },
    ViewerFollowed {
        viewer: Viewer,
    },
    ViewerRaided {
        viewer: Viewer,
        num_viewers: u64,
    },
    ViewerCheered {
        /// `None` for anonymous cheers.
        viewer: Option<Viewer>,
        num_bits: u64,
        message: String,
    },
    ViewerSubscribed {
        viewer: Viewer,
        tier: String,
        is_gift: bool,
    },
    ViewerSubscriptionEnded {
        viewer: Viewer,
        tier: String,
    },
    ViewerGiftedSubs {
        /// `None` for anonymous gifts.
        viewer: Option<Viewer>,
        num_subscriptions: u64,
        tier: String,
    },
    ViewerResubscribed {
        viewer: Viewer,
        tier: String,
        cumulative_months: u32,
        message: String,
    },
}

impl ChannelEventPayload {
    /// Maps a Twitch event into its canonical form.
    ///
    /// # Errors
    ///
    /// - `UnsupportedEvent` - no mapping for the subscription type and version
    /// - `InvalidEvent` - event JSON does not have the expected shape
    pub fn from_twitch(
        subscription_type: &str,
        version: &str,
        event: &str,
    ) -> Result<Self, WebhookError> {
        let payload = match (subscription_type, version) {
            ("channel.update", "2") => {
                let e: ChannelUpdate = parse(subscription_type, event)?;
                ChannelEventPayload::ChannelUpdated {
                    title: e.title,
                    category_id: e.category_id,
                    category_name: e.category_name,
                }
            }
            ("stream.online", "1") => {
                let e: StreamOnline = parse(subscription_type, event)?;
                ChannelEventPayload::StreamStarted {
                    started_at: e.started_at,
                }
            }
            ("stream.offline", "1") => ChannelEventPayload::StreamEnded,
            ("channel.hype_train.begin", "1") => {
                let e: HypeTrainBegin = parse(subscription_type, event)?;
                ChannelEventPayload::HypeTrainStarted {
                    level: e.level,
                    total: e.total,
                    goal: e.goal,
                }
            }
            ("channel.follow", "2") => {
                let e: UserEvent = parse(subscription_type, event)?;
                ChannelEventPayload::ViewerFollowed {
                    viewer: e.viewer(),
                }
            }
            ("channel.raid", "1") => {
                let e: Raid = parse(subscription_type, event)?;
                ChannelEventPayload::ViewerRaided {
                    viewer: Viewer {
                        user_id: e.from_broadcaster_user_id,
                        user_login: e.from_broadcaster_user_login,
                        user_name: e.from_broadcaster_user_name,
                    },
                    num_viewers: e.viewers,
                }
            }
            ("channel.cheer", "1") => {
                let e: Cheer = parse(subscription_type, event)?;
                ChannelEventPayload::ViewerCheered {
                    viewer: e.user.into_viewer(e.is_anonymous),
                    num_bits: e.bits,
                    message: e.message,
                }
            }
            ("channel.subscribe", "1") => {
                let e: Subscribe = parse(subscription_type, event)?;
                ChannelEventPayload::ViewerSubscribed {
                    viewer: e.user.viewer(),
                    tier: e.tier,
                    is_gift: e.is_gift,
                }
            }
            ("channel.subscription.end", "1") => {
                let e: Subscribe = parse(subscription_type, event)?;
                ChannelEventPayload::ViewerSubscriptionEnded {
                    viewer: e.user.viewer(),
                    tier: e.tier,
                }
            }
            ("channel.subscription.gift", "1") => {
                let e: SubscriptionGift = parse(subscription_type, event)?;
                ChannelEventPayload::ViewerGiftedSubs {
                    viewer: e.user.into_viewer(e.is_anonymous),
                    num_subscriptions: e.total,
                    tier: e.tier,
                }
            }
            ("channel.subscription.message", "1") => {
                let e: SubscriptionMessage = parse(subscription_type, event)?;
                ChannelEventPayload::ViewerResubscribed {
                    viewer: e.user.viewer(),
                    tier: e.tier,
                    cumulative_months: e.cumulative_months,
                    message: e.message.text,
                }
            }
            _ => return Err(WebhookError::unsupported(subscription_type, version)),
        };
        Ok(payload)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ChannelEventPayload::ChannelUpdated { .. } => "channel_updated",
            ChannelEventPayload::StreamStarted { .. } => "stream_started",
            ChannelEventPayload::StreamEnded => "stream_ended",
            ChannelEventPayload::HypeTrainStarted { .. } => "hype_train_started",
            ChannelEventPayload::ViewerFollowed { .. } => "viewer_followed",
            ChannelEventPayload::ViewerRaided { .. } => "viewer_raided",
            ChannelEventPayload::ViewerCheered { .. } => "viewer_cheered",
            ChannelEventPayload::ViewerSubscribed { .. } => "viewer_subscribed",
            ChannelEventPayload::ViewerSubscriptionEnded { .. } => "viewer_subscription_ended",
            ChannelEventPayload::ViewerGiftedSubs { .. } => "viewer_gifted_subs",
            ChannelEventPayload::ViewerResubscribed { .. } => "viewer_resubscribed",
        }
    }
}

/// An event as published to downstream consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelEvent {
    pub id: Uuid,
    pub channel_user_id: String,
    pub received_at: DateTime<Utc>,

    /// Provider subscription that produced the event.
    pub subscription_id: String,

    pub event: ChannelEventPayload,
}

impl ChannelEvent {
    /// Translates a delivery's event into a canonical channel event.
    pub fn from_delivery(
        subscription: &SubscriptionDescriptor,
        event: &str,
        received_at: DateTime<Utc>,
    ) -> Result<Self, WebhookError> {
        let payload = ChannelEventPayload::from_twitch(
            &subscription.subscription_type,
            &subscription.version,
            event,
        )?;
        Ok(Self {
            id: Uuid::new_v4(),
            channel_user_id: subscription.channel_user_id().unwrap_or_default().to_string(),
            received_at,
            subscription_id: subscription.id.clone(),
            event: payload,
        })
    }

    pub fn kind(&self) -> &'static str {
        self.event.kind()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

fn parse<T: DeserializeOwned>(subscription_type: &str, event: &str) -> Result<T, WebhookError> {
    serde_json::from_str(event).map_err(|e| WebhookError::invalid_event(subscription_type, e.to_string()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Twitch event payloads
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Deserialize)]
struct ChannelUpdate {
    title: String,
    #[serde(default)]
    category_id: String,
    #[serde(default)]
    category_name: String,
}

#[derive(Deserialize)]
struct StreamOnline {
    #[serde(default)]
    started_at: Option<String>,
}

#[derive(Deserialize)]
struct HypeTrainBegin {
    #[serde(default)]
    level: Option<u32>,
    total: u64,
    goal: u64,
}

#[derive(Deserialize)]
struct UserEvent {
    user_id: String,
    user_login: String,
    user_name: String,
}

impl UserEvent {
    fn viewer(self) -> Viewer {
        Viewer {
            user_id: self.user_id,
            user_login: self.user_login,
            user_name: self.user_name,
        }
    }
}

/// User fields that Twitch nulls out for anonymous actions.
#[derive(Deserialize)]
struct MaybeAnonymousUser {
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    user_login: Option<String>,
    #[serde(default)]
    user_name: Option<String>,
}

impl MaybeAnonymousUser {
    fn into_viewer(self, is_anonymous: bool) -> Option<Viewer> {
        if is_anonymous {
            return None;
        }
        Some(Viewer {
            user_id: self.user_id?,
            user_login: self.user_login.unwrap_or_default(),
            user_name: self.user_name.unwrap_or_default(),
        })
    }
}

#[derive(Deserialize)]
struct Raid {
    from_broadcaster_user_id: String,
    from_broadcaster_user_login: String,
    from_broadcaster_user_name: String,
    viewers: u64,
}

#[derive(Deserialize)]
struct Cheer {
    #[serde(default)]
    is_anonymous: bool,
    #[serde(flatten)]
    user: MaybeAnonymousUser,
    #[serde(default)]
    message: String,
    bits: u64,
}

#[derive(Deserialize)]
struct Subscribe {
    #[serde(flatten)]
    user: UserEvent,
    tier: String,
    #[serde(default)]
    is_gift: bool,
}

#[derive(Deserialize)]
struct SubscriptionGift {
    #[serde(default)]
    is_anonymous: bool,
    #[serde(flatten)]
    user: MaybeAnonymousUser,
    total: u64,
    tier: String,
}

#[derive(Deserialize)]
struct SubscriptionMessage {
    #[serde(flatten)]
    user: UserEvent,
    tier: String,
    cumulative_months: u32,
    message: SubscriptionMessageText,
}

#[derive(Deserialize)]
struct SubscriptionMessageText {
    #[serde(default)]
    text: String,
}
