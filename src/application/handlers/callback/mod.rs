//! Webhook callback handlers.
//!
//! [`WebhookDispatcher`] authenticates and routes each delivery;
//! [`EventTranslator`] is the production sink that turns notifications into
//! published channel events.

mod dispatcher;
mod translator;

pub use dispatcher::{DeliveryOutcome, HandleDeliveryCommand, WebhookDispatcher};
pub use translator::EventTranslator;
