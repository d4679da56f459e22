//! Declared EventSub subscriptions.
//!
//! Every subscription the service needs in order to function is listed here
//! once, with its condition expressed as a template over [`ConditionParams`].
//! The declaration order matters: reconciliation matches registered
//! subscriptions against these entries first-fit, in order.
//!
//! [`ConditionParams`]: super::ConditionParams

use super::condition::Condition;

/// Placeholder resolved to the monitored channel's Twitch user ID.
pub const CHANNEL_USER_ID: &str = "{{channel_user_id}}";

/// A subscription that must exist for the service to work.
///
/// Identity is `(subscription_type, version)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredSubscription {
    pub subscription_type: String,
    pub version: String,
    pub templated_condition: Condition,
    /// User scopes the broadcaster must grant before Twitch accepts this
    /// subscription.
    pub required_scopes: Vec<String>,
}

impl RequiredSubscription {
    pub fn new(
        subscription_type: impl Into<String>,
        version: impl Into<String>,
        templated_condition: Condition,
    ) -> Self {
        Self {
            subscription_type: subscription_type.into(),
            version: version.into(),
            templated_condition,
            required_scopes: Vec::new(),
        }
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.required_scopes.push(scope.into());
        self
    }

    fn broadcaster(subscription_type: &str, version: &str) -> Self {
        Self::new(
            subscription_type,
            version,
            Condition::for_broadcaster(CHANNEL_USER_ID),
        )
    }
}

/// Ordered list of required subscriptions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredSubscriptions(Vec<RequiredSubscription>);

impl RequiredSubscriptions {
    pub fn new(entries: Vec<RequiredSubscription>) -> Self {
        Self(entries)
    }

    /// The subscriptions this service registers for the monitored channel.
    pub fn catalog() -> Self {
        Self(vec![
            RequiredSubscription::broadcaster("channel.update", "2"),
            RequiredSubscription::broadcaster("stream.online", "1"),
            RequiredSubscription::broadcaster("stream.offline", "1"),
            RequiredSubscription::broadcaster("channel.hype_train.begin", "1")
                .with_scope("channel:read:hype_train"),
            RequiredSubscription::new(
                "channel.follow",
                "2",
                Condition::for_broadcaster(CHANNEL_USER_ID).with_moderator(CHANNEL_USER_ID),
            )
            .with_scope("moderator:read:followers"),
            RequiredSubscription::new(
                "channel.raid",
                "1",
                Condition {
                    to_broadcaster_user_id: Some(CHANNEL_USER_ID.to_string()),
                    ..Default::default()
                },
            ),
            RequiredSubscription::broadcaster("channel.cheer", "1").with_scope("bits:read"),
            RequiredSubscription::broadcaster("channel.subscribe", "1")
                .with_scope("channel:read:subscriptions"),
            RequiredSubscription::broadcaster("channel.subscription.end", "1")
                .with_scope("channel:read:subscriptions"),
            RequiredSubscription::broadcaster("channel.subscription.gift", "1")
                .with_scope("channel:read:subscriptions"),
            RequiredSubscription::broadcaster("channel.subscription.message", "1")
                .with_scope("channel:read:subscriptions"),
        ])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RequiredSubscription> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Union of every entry's scopes, deduplicated, in first-seen order.
    pub fn required_scopes(&self) -> Vec<String> {
        let mut scopes: Vec<String> = Vec::new();
        for scope in self.0.iter().flat_map(|r| r.required_scopes.iter()) {
            if !scopes.contains(scope) {
                scopes.push(scope.clone());
            }
        }
        scopes
    }

    /// Finds the declared entry for a `(type, version)` pair.
    pub fn find(&self, subscription_type: &str, version: &str) -> Option<&RequiredSubscription> {
        self.0
            .iter()
            .find(|r| r.subscription_type == subscription_type && r.version == version)
    }
}

impl<'a> IntoIterator for &'a RequiredSubscriptions {
    type Item = &'a RequiredSubscription;
    type IntoIter = std::slice::Iter<'a, RequiredSubscription>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
