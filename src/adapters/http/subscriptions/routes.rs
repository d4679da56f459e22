//! Axum router configuration for subscription endpoints.

use axum::{middleware, routing::get, Router};

use super::handlers::{get_status, purge, reconcile};
use crate::adapters::http::middleware::require_broadcaster;
use crate::adapters::http::AppState;

/// Create the subscription management router.
///
/// # Routes (broadcaster only)
/// - `GET /subscriptions` - Status of required and ancillary subscriptions
/// - `PATCH /subscriptions` - Create missing required subscriptions
/// - `DELETE /subscriptions` - Delete every owned subscription
pub fn subscription_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/subscriptions",
            get(get_status).patch(reconcile).delete(purge),
        )
        .route_layer(middleware::from_fn_with_state(
            state.access_validator.clone(),
            require_broadcaster,
        ))
}
