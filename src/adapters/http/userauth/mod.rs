//! Broadcaster authorization HTTP adapter.

mod handlers;
mod routes;

pub use handlers::{FinishAuthParams, UserAuthApiError};
pub use routes::userauth_routes;
