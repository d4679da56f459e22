//! Reconciliation of required subscriptions against registered ones.
//!
//! [`reconcile_status`] is a pure function: it receives the subscriptions
//! already known to be owned by this service and produces the [`Status`]
//! reported by `GET /subscriptions`. Fetching and filtering live in the
//! application layer.

use serde::{Deserialize, Serialize};

use super::catalog::RequiredSubscriptions;
use super::condition::Condition;
use super::errors::TemplateError;
use super::registered::RegisteredSubscription;
use super::template::ConditionParams;

/// Status reported for a required subscription with no registered match.
pub const STATUS_MISSING: &str = "missing";

/// Provider status of a fully active subscription.
pub const STATUS_ENABLED: &str = "enabled";

/// State of one subscription, required or ancillary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionState {
    pub required: bool,

    #[serde(rename = "type")]
    pub subscription_type: String,

    pub version: String,

    pub condition: Condition,

    pub status: String,

    /// Provider ID of the matched registration; empty when missing.
    #[serde(skip)]
    pub subscription_id: String,
}

impl SubscriptionState {
    pub fn is_missing(&self) -> bool {
        self.status == STATUS_MISSING
    }

    pub fn is_enabled(&self) -> bool {
        self.status == STATUS_ENABLED
    }

    /// True iff a registration exists that this service owns.
    pub fn is_registered(&self) -> bool {
        !self.subscription_id.is_empty()
    }
}

/// Overall subscription health of the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    /// True iff every required subscription is enabled.
    pub ok: bool,

    /// Required entries in declaration order, then ancillary entries in
    /// provider order.
    pub subscriptions: Vec<SubscriptionState>,
}

impl Status {
    pub fn required(&self) -> impl Iterator<Item = &SubscriptionState> {
        self.subscriptions.iter().filter(|s| s.required)
    }

    pub fn ancillary(&self) -> impl Iterator<Item = &SubscriptionState> {
        self.subscriptions.iter().filter(|s| !s.required)
    }
}

/// Compares owned registrations with the required list.
///
/// Each required entry, in declaration order, takes the first remaining
/// registration with identical type, version and resolved condition. A
/// registration satisfies at most one required entry. Whatever is left over
/// is reported as ancillary.
///
/// # Errors
///
/// Returns [`TemplateError`] if a required condition cannot be resolved.
pub fn reconcile_status(
    owned: Vec<RegisteredSubscription>,
    params: &ConditionParams,
    required: &RequiredSubscriptions,
) -> Result<Status, TemplateError> {
    let mut unmatched = owned;
    let mut subscriptions = Vec::with_capacity(required.len() + unmatched.len());

    for entry in required {
        let condition = params.format(&entry.templated_condition)?;

        let found = unmatched.iter().position(|registered| {
            registered.subscription_type == entry.subscription_type
                && registered.version == entry.version
                && registered.condition == condition
        });

        let (status, subscription_id) = match found {
            Some(index) => {
                let registered = unmatched.remove(index);
                (registered.status, registered.id)
            }
            None => (STATUS_MISSING.to_string(), String::new()),
        };

        subscriptions.push(SubscriptionState {
            required: true,
            subscription_type: entry.subscription_type.clone(),
            version: entry.version.clone(),
            condition,
            status,
            subscription_id,
        });
    }

    subscriptions.extend(unmatched.into_iter().map(|registered| SubscriptionState {
        required: false,
        subscription_type: registered.subscription_type,
        version: registered.version,
        condition: registered.condition,
        status: registered.status,
        subscription_id: registered.id,
    }));

    let ok = subscriptions
        .iter()
        .filter(|s| s.required)
        .all(SubscriptionState::is_enabled);

    Ok(Status { ok, subscriptions })
}
