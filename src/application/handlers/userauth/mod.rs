//! User authorization handlers.

mod authorization_flow;

pub use authorization_flow::{AuthorizationFlow, FINISH_PATH};
