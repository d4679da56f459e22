//! User authorization domain module.
//!
//! The broadcaster grants this app the scopes its subscriptions require
//! through an OAuth code-grant redirect. This module holds the CSRF token
//! store guarding that redirect and its error type.

mod csrf;
mod errors;

pub use csrf::{CsrfTokenStore, TOKEN_LIFETIME_MINUTES};
pub use errors::AuthFlowError;
