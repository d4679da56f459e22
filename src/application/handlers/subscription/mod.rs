//! Subscription handlers.

mod reconciler;

pub use reconciler::{PurgeResult, ReconcileResult, SubscriptionReconciler};
