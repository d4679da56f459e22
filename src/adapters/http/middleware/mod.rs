//! HTTP middleware for axum.
//!
//! - `auth` - Broadcaster bearer-token middleware for the admin routes

pub mod auth;

pub use auth::{require_broadcaster, AccessRejection, AccessState};
