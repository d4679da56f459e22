//! AccessValidator port - Resolves bearer tokens to principals.
//!
//! The admin middleware depends only on this trait, so the token scheme
//! (static token, external auth service, mock) can change without touching
//! the HTTP layer.

use async_trait::async_trait;

use crate::domain::access::{AccessError, Principal};

#[async_trait]
pub trait AccessValidator: Send + Sync {
    /// Validate a bearer token.
    ///
    /// Returns `AccessError::InvalidToken` for tokens it does not recognize.
    async fn validate(&self, token: &str) -> Result<Principal, AccessError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn AccessValidator) {}
}
