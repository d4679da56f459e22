//! HTTP adapters - axum routes for the service's three surfaces.
//!
//! - `callback` - Webhook deliveries from Twitch
//! - `subscriptions` - Broadcaster-only subscription management
//! - `userauth` - Broadcaster authorization handshake

pub mod callback;
pub mod dto;
pub mod middleware;
pub mod subscriptions;
pub mod userauth;

mod app;

pub use app::{app_router, AppState};
pub use dto::ErrorResponse;
