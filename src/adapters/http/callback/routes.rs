//! Axum router configuration for the webhook callback.

use axum::{routing::post, Router};

use super::handlers::handle_callback;
use crate::adapters::http::AppState;

/// Path Twitch delivers to; subscriptions are registered with `origin + CALLBACK_PATH`.
pub const CALLBACK_PATH: &str = "/callback";

/// # Routes (signature verified)
/// - `POST /callback` - EventSub deliveries
pub fn callback_routes() -> Router<AppState> {
    Router::new().route(CALLBACK_PATH, post(handle_callback))
}
