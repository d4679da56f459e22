//! EventSub subscription conditions.
//!
//! A condition narrows which events a subscription receives, e.g. "only
//! `channel.update` events for broadcaster 1337". Twitch models conditions as a
//! flat JSON object whose keys depend on the subscription type. We model the
//! supported keys as explicit optional fields so that a typo in a field name is
//! a compile error rather than a silently unmatched subscription.
//!
//! # Serialization
//!
//! Absent fields are omitted, and so are fields holding an empty string: the
//! `/subscriptions` status payload never contains `null` or `""` values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Key/value filter attached to an EventSub subscription.
///
/// Two conditions are equal iff every field matches exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default, skip_serializing_if = "is_blank")]
    pub broadcaster_user_id: Option<String>,

    #[serde(default, skip_serializing_if = "is_blank")]
    pub from_broadcaster_user_id: Option<String>,

    #[serde(default, skip_serializing_if = "is_blank")]
    pub moderator_user_id: Option<String>,

    #[serde(default, skip_serializing_if = "is_blank")]
    pub to_broadcaster_user_id: Option<String>,

    #[serde(default, skip_serializing_if = "is_blank")]
    pub reward_id: Option<String>,

    #[serde(default, skip_serializing_if = "is_blank")]
    pub client_id: Option<String>,

    #[serde(default, skip_serializing_if = "is_blank")]
    pub extension_client_id: Option<String>,

    #[serde(default, skip_serializing_if = "is_blank")]
    pub user_id: Option<String>,
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

/// Wire names of every supported condition field, in serialization order.
pub const CONDITION_FIELDS: [&str; 8] = [
    "broadcaster_user_id",
    "from_broadcaster_user_id",
    "moderator_user_id",
    "to_broadcaster_user_id",
    "reward_id",
    "client_id",
    "extension_client_id",
    "user_id",
];

impl Condition {
    /// Condition scoped to a single broadcaster, the most common shape.
    pub fn for_broadcaster(broadcaster_user_id: impl Into<String>) -> Self {
        Self {
            broadcaster_user_id: Some(broadcaster_user_id.into()),
            ..Default::default()
        }
    }

    pub fn with_moderator(mut self, moderator_user_id: impl Into<String>) -> Self {
        self.moderator_user_id = Some(moderator_user_id.into());
        self
    }

    /// Returns the value stored under a wire field name.
    pub fn get(&self, field: &str) -> Option<&str> {
        let value = match field {
            "broadcaster_user_id" => &self.broadcaster_user_id,
            "from_broadcaster_user_id" => &self.from_broadcaster_user_id,
            "moderator_user_id" => &self.moderator_user_id,
            "to_broadcaster_user_id" => &self.to_broadcaster_user_id,
            "reward_id" => &self.reward_id,
            "client_id" => &self.client_id,
            "extension_client_id" => &self.extension_client_id,
            "user_id" => &self.user_id,
            _ => return None,
        };
        value.as_deref()
    }

    fn slot_mut(&mut self, field: &str) -> Option<&mut Option<String>> {
        match field {
            "broadcaster_user_id" => Some(&mut self.broadcaster_user_id),
            "from_broadcaster_user_id" => Some(&mut self.from_broadcaster_user_id),
            "moderator_user_id" => Some(&mut self.moderator_user_id),
            "to_broadcaster_user_id" => Some(&mut self.to_broadcaster_user_id),
            "reward_id" => Some(&mut self.reward_id),
            "client_id" => Some(&mut self.client_id),
            "extension_client_id" => Some(&mut self.extension_client_id),
            "user_id" => Some(&mut self.user_id),
            _ => None,
        }
    }

    /// Flattens the condition into a map of its non-empty fields.
    pub fn fields(&self) -> BTreeMap<&'static str, String> {
        CONDITION_FIELDS
            .iter()
            .filter_map(|name| {
                self.get(name)
                    .filter(|v| !v.is_empty())
                    .map(|v| (*name, v.to_string()))
            })
            .collect()
    }

    /// Builds a condition from a field map.
    ///
    /// Keys outside the supported set are ignored.
    pub fn from_fields<K, V, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut condition = Condition::default();
        for (key, value) in fields {
            if let Some(slot) = condition.slot_mut(key.as_ref()) {
                *slot = Some(value.into());
            }
        }
        condition
    }

    /// Applies `f` to every present field, producing a new condition.
    ///
    /// Used by templating; fails fast on the first error.
    pub fn try_map<E, F>(&self, mut f: F) -> Result<Condition, E>
    where
        F: FnMut(&str, &str) -> Result<String, E>,
    {
        let mut mapped = Condition::default();
        for name in CONDITION_FIELDS {
            if let Some(value) = self.get(name) {
                let rendered = f(name, value)?;
                if let Some(slot) = mapped.slot_mut(name) {
                    *slot = Some(rendered);
                }
            }
        }
        Ok(mapped)
    }

    /// Treats empty-string fields as absent.
    ///
    /// Twitch sometimes echoes every condition key of a type, leaving the
    /// unused ones as `""`.
    pub fn normalized(mut self) -> Self {
        for name in CONDITION_FIELDS {
            if let Some(slot) = self.slot_mut(name) {
                if slot.as_deref() == Some("") {
                    *slot = None;
                }
            }
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }
}
