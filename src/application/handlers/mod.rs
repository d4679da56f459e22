//! Application handlers.
//!
//! - `subscription` - status, reconcile and purge of EventSub subscriptions
//! - `callback` - verification and routing of webhook deliveries
//! - `userauth` - broadcaster authorization handshake

pub mod callback;
pub mod subscription;
pub mod userauth;

pub use callback::{DeliveryOutcome, EventTranslator, HandleDeliveryCommand, WebhookDispatcher};
pub use subscription::{PurgeResult, ReconcileResult, SubscriptionReconciler};
pub use userauth::{AuthorizationFlow, FINISH_PATH};
