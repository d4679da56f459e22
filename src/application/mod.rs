//! Application layer - Use-case handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Handlers are constructed once at startup with `Arc`-shared ports and
//! invoked per request by the HTTP adapters.

pub mod handlers;

pub use handlers::{
    // Subscription reconciliation
    PurgeResult, ReconcileResult, SubscriptionReconciler,
    // Webhook deliveries
    DeliveryOutcome, EventTranslator, HandleDeliveryCommand, WebhookDispatcher,
    // User authorization
    AuthorizationFlow,
};
