//! Authorization handshake errors.
//!
//! All of them are the caller's fault and map to 400. Messages are shown
//! verbatim to the broadcaster in their browser.

use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthFlowError {
    #[error("'state' value not found in URL query params")]
    MissingState,

    /// Unknown, replayed or expired CSRF token.
    #[error("CSRF token verification failed")]
    CsrfInvalid,

    #[error("'scope' value not found in URL query params")]
    MissingScope,

    #[error("required scope '{0}' was not granted")]
    ScopeNotGranted(String),
}

impl AuthFlowError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthFlowError::MissingState => "MISSING_STATE",
            AuthFlowError::CsrfInvalid => "CSRF_INVALID",
            AuthFlowError::MissingScope => "MISSING_SCOPE",
            AuthFlowError::ScopeNotGranted(_) => "SCOPE_NOT_GRANTED",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}
