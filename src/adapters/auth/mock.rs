//! Mock access validator for testing.
//!
//! # Example
//!
//! ```ignore
//! use eventsub_hooks::adapters::auth::MockAccessValidator;
//! use eventsub_hooks::domain::access::Principal;
//!
//! let validator = MockAccessValidator::new()
//!     .with_principal("admin-token", Principal::broadcaster("cool_user"))
//!     .with_viewer("viewer-token", "some_viewer");
//!
//! let result = validator.validate("admin-token").await;
//! assert!(result.is_ok());
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::access::{AccessError, Principal, Role};
use crate::ports::AccessValidator;

/// Mock access validator for testing.
///
/// Stores a map of tokens to principals. Tokens not in the map return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockAccessValidator {
    /// Map of valid tokens to their associated principals
    tokens: RwLock<HashMap<String, Principal>>,
    /// Optional error to return for all validations (for error testing)
    force_error: RwLock<Option<AccessError>>,
}

impl MockAccessValidator {
    /// Creates a new empty mock validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token that maps to a principal.
    pub fn with_principal(self, token: impl Into<String>, principal: Principal) -> Self {
        self.tokens.write().unwrap().insert(token.into(), principal);
        self
    }

    /// Adds a valid token for the broadcaster.
    pub fn with_broadcaster(self, token: impl Into<String>, name: impl Into<String>) -> Self {
        self.with_principal(token, Principal::broadcaster(name))
    }

    /// Adds a valid token for a caller without admin rights.
    pub fn with_viewer(self, token: impl Into<String>, name: impl Into<String>) -> Self {
        self.with_principal(token, Principal::new(name, Role::Viewer))
    }

    /// Forces all validations to return the specified error.
    pub fn with_error(self, error: AccessError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }

    /// Clears the forced error and returns to normal operation.
    pub fn clear_error(&self) {
        *self.force_error.write().unwrap() = None;
    }

    /// Returns the number of registered valid tokens.
    pub fn token_count(&self) -> usize {
        self.tokens.read().unwrap().len()
    }
}

#[async_trait]
impl AccessValidator for MockAccessValidator {
    async fn validate(&self, token: &str) -> Result<Principal, AccessError> {
        if let Some(error) = self.force_error.read().unwrap().clone() {
            return Err(error);
        }

        self.tokens
            .read()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or(AccessError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn known_token_resolves_principal() {
        let validator = MockAccessValidator::new().with_broadcaster("token-1", "cool_user");

        let principal = validator.validate("token-1").await.unwrap();
        assert_eq!(principal, Principal::broadcaster("cool_user"));
    }

    #[tokio::test]
    async fn unknown_token_is_invalid() {
        let validator = MockAccessValidator::new().with_broadcaster("token-1", "cool_user");

        assert_eq!(
            validator.validate("token-2").await,
            Err(AccessError::InvalidToken)
        );
    }

    #[tokio::test]
    async fn forced_error_overrides_tokens_until_cleared() {
        let validator = MockAccessValidator::new()
            .with_broadcaster("token-1", "cool_user")
            .with_error(AccessError::ServiceUnavailable("down".to_string()));

        assert!(matches!(
            validator.validate("token-1").await,
            Err(AccessError::ServiceUnavailable(_))
        ));

        validator.clear_error();
        assert!(validator.validate("token-1").await.is_ok());
        assert_eq!(validator.token_count(), 1);
    }
}
