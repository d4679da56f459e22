//! Subscription management HTTP adapter.

mod handlers;
mod routes;

pub use handlers::SubscriptionsApiError;
pub use routes::subscription_routes;
