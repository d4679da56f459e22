//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Provider Ports
//!
//! - `EventSubClient` - List, create and delete EventSub subscriptions
//!
//! ## Webhook Ports
//!
//! - `SignatureVerifier` - Authenticates inbound deliveries
//! - `EventSink` - Receives verified event notifications
//! - `EventPublisher` - Hands canonical events to downstream consumers
//!
//! ## Access Ports
//!
//! - `AccessValidator` - Resolves admin bearer tokens to principals

mod access_validator;
mod event_publisher;
mod event_sink;
mod eventsub_client;
mod signature_verifier;

pub use access_validator::AccessValidator;
pub use event_publisher::{EventPublisher, PublishError};
pub use event_sink::EventSink;
pub use eventsub_client::{CreateSubscriptionRequest, EventSubClient, ProviderError, SubscriptionPage};
pub use signature_verifier::SignatureVerifier;
