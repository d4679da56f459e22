//! Access validation adapters.
//!
//! Implementations of the `AccessValidator` port:
//!
//! - `static_token` - Constant-time comparison against the configured broadcaster token
//! - `mock` - Test implementation with a token map

mod mock;
mod static_token;

pub use mock::MockAccessValidator;
pub use static_token::StaticTokenValidator;
