//! Subscription domain module.
//!
//! Declares which EventSub subscriptions the service needs and reconciles
//! that declaration against what the provider has registered.
//!
//! # Module Structure
//!
//! - `condition` - Typed EventSub condition with blank-omitting serialization
//! - `template` - `{{channel_user_id}}` substitution into conditions
//! - `catalog` - The declared `RequiredSubscriptions`
//! - `registered` - Subscriptions as reported by the provider
//! - `status` - Pure reconciliation producing `Status`

mod catalog;
mod condition;
mod errors;
mod registered;
mod status;
mod template;

pub use catalog::{RequiredSubscription, RequiredSubscriptions, CHANNEL_USER_ID};
pub use condition::{Condition, CONDITION_FIELDS};
pub use errors::{ReconcileError, TemplateError};
pub use registered::{RegisteredSubscription, Transport, WEBHOOK_METHOD};
pub use status::{reconcile_status, Status, SubscriptionState, STATUS_ENABLED, STATUS_MISSING};
pub use template::ConditionParams;
