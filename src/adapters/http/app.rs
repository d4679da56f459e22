//! Application router and shared state.

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use super::callback::callback_routes;
use super::subscriptions::subscription_routes;
use super::userauth::userauth_routes;
use crate::application::{AuthorizationFlow, SubscriptionReconciler, WebhookDispatcher};
use crate::ports::AccessValidator;

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// Cloned for each request; every field is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub reconciler: Arc<SubscriptionReconciler>,
    pub dispatcher: Arc<WebhookDispatcher>,
    pub authorization: Arc<AuthorizationFlow>,
    pub access_validator: Arc<dyn AccessValidator>,
}

/// Create the complete service router.
///
/// No request-level timeout: reconciliation must not be cut off between
/// provider calls, and each Helix call carries its own transport timeout.
///
/// # Routes
/// - `POST /callback` - EventSub deliveries (signature verified)
/// - `GET|PATCH|DELETE /subscriptions` - Subscription management (broadcaster only)
/// - `GET /userauth/start`, `GET /userauth/finish` - Authorization handshake
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .merge(callback_routes())
        .merge(subscription_routes(&state))
        .merge(userauth_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
