//! Access control types for the admin endpoints.
//!
//! The subscription endpoints may only be called by the broadcaster. Callers
//! present a bearer token; an `AccessValidator` adapter turns it into a
//! [`Principal`] carrying a [`Role`].

use axum::http::StatusCode;
use thiserror::Error;

/// Access level of an authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Viewer,
    Broadcaster,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Viewer => "viewer",
            Role::Broadcaster => "broadcaster",
        }
    }
}

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub name: String,
    pub role: Role,
}

impl Principal {
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }

    pub fn broadcaster(name: impl Into<String>) -> Self {
        Self::new(name, Role::Broadcaster)
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }
}

/// Errors raised while authorizing an admin request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// No bearer token was presented.
    #[error("Authentication is required")]
    MissingToken,

    /// The token is not recognized.
    #[error("Invalid token")]
    InvalidToken,

    /// The caller is authenticated but lacks the required role.
    #[error("Role '{required}' is required")]
    InsufficientRole { required: &'static str },

    /// The validator could not reach its backing service.
    #[error("Access validation unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AccessError {
    pub fn insufficient_role(required: Role) -> Self {
        AccessError::InsufficientRole {
            required: required.as_str(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AccessError::MissingToken => "AUTHENTICATION_REQUIRED",
            AccessError::InvalidToken => "INVALID_TOKEN",
            AccessError::InsufficientRole { .. } => "FORBIDDEN",
            AccessError::ServiceUnavailable(_) => "AUTH_UNAVAILABLE",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AccessError::MissingToken | AccessError::InvalidToken => StatusCode::UNAUTHORIZED,
            AccessError::InsufficientRole { .. } => StatusCode::FORBIDDEN,
            AccessError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}
