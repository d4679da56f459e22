//! Webhook domain module.
//!
//! Everything needed to authenticate, decode and interpret an EventSub
//! delivery, independent of the HTTP framework.
//!
//! # Module Structure
//!
//! - `delivery` - Headers, message types and the decoded envelope
//! - `signature` - HMAC-SHA256 `SignatureVerifier` implementation
//! - `channel_event` - Canonical `ChannelEvent` and Twitch payload mapping
//! - `errors` - `WebhookError` with HTTP status mapping

mod channel_event;
mod delivery;
mod errors;
mod signature;

pub use channel_event::{ChannelEvent, ChannelEventPayload, Viewer};
pub use delivery::{
    DeliveryEnvelope, DeliveryHeaders, MessageType, SubscriptionDescriptor, HEADER_MESSAGE_ID,
    HEADER_MESSAGE_SIGNATURE, HEADER_MESSAGE_TIMESTAMP, HEADER_MESSAGE_TYPE,
};
pub use errors::WebhookError;
pub use signature::{sign_delivery, HmacSignatureVerifier};
