//! Subscription-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | TemplateError | 500 |
//! | ReconcileError::Template | 500 |
//! | ReconcileError::Provider | 500 |

use axum::http::StatusCode;
use thiserror::Error;

use crate::ports::ProviderError;

/// A condition template could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// The template references a parameter that `ConditionParams` does not carry.
    #[error("condition field '{field}' references an unknown parameter: '{template}'")]
    UnknownField { field: String, template: String },

    /// The template is not syntactically valid.
    #[error("condition field '{field}' is not a valid template: {message}")]
    Malformed { field: String, message: String },
}

impl TemplateError {
    pub fn unknown_field(field: impl Into<String>, template: impl Into<String>) -> Self {
        TemplateError::UnknownField {
            field: field.into(),
            template: template.into(),
        }
    }

    pub fn malformed(field: impl Into<String>, message: impl Into<String>) -> Self {
        TemplateError::Malformed {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors surfaced by status, reconcile and purge.
///
/// Any error aborts the operation. Creates or deletes issued before the
/// failure are left in place.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("failed to resolve required subscription condition: {0}")]
    Template(#[from] TemplateError),

    #[error("EventSub request failed: {0}")]
    Provider(#[from] ProviderError),
}

impl ReconcileError {
    /// Stable machine-readable code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            ReconcileError::Template(_) => "TEMPLATE_ERROR",
            ReconcileError::Provider(_) => "PROVIDER_API_ERROR",
        }
    }

    /// Every reconciliation failure is reported to the operator as a 500.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    /// Upstream HTTP status, when the provider answered at all.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            ReconcileError::Provider(err) => err.upstream_status(),
            ReconcileError::Template(_) => None,
        }
    }
}
