//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `twitch` - Helix API client for EventSub subscriptions
//! - `events` - Event publishers (Redis pub/sub, in-memory)
//! - `auth` - Access validators for the admin routes
//! - `http` - axum routes, handlers and middleware

pub mod auth;
pub mod events;
pub mod http;
pub mod twitch;

pub use auth::{MockAccessValidator, StaticTokenValidator};
pub use events::{InMemoryEventPublisher, RedisEventPublisher};
pub use http::{app_router, AppState};
pub use twitch::{HelixClient, HelixConfig};
