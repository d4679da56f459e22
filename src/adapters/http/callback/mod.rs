//! EventSub webhook HTTP adapter.

mod handlers;
mod routes;

pub use handlers::{delivery_headers, CallbackApiError};
pub use routes::{callback_routes, CALLBACK_PATH};
