//! Axum router configuration for the authorization handshake.

use axum::{routing::get, Router};

use super::handlers::{finish_auth, start_auth};
use crate::adapters::http::AppState;

/// # Routes (no auth; the finish step is guarded by the CSRF state)
/// - `GET /userauth/start` - 303 to the Twitch authorize page
/// - `GET /userauth/finish` - Redirect target after the broadcaster consents
pub fn userauth_routes() -> Router<AppState> {
    Router::new()
        .route("/userauth/start", get(start_auth))
        .route("/userauth/finish", get(finish_auth))
}
