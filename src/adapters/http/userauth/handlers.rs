//! HTTP handlers for the broadcaster authorization handshake.
//!
//! Both routes are opened in a browser, so failures are plain text rather
//! than JSON.

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;

use crate::adapters::http::AppState;
use crate::domain::userauth::AuthFlowError;

const SUCCESS_PAGE: &str = "<!DOCTYPE html><html><head><title>OK</title></head><body><h1>Success!</h1><p>Access granted. You may close this window.</p></body></html>";

/// Query parameters Twitch appends to the redirect.
#[derive(Debug, Default, Deserialize)]
pub struct FinishAuthParams {
    pub state: Option<String>,
    pub scope: Option<String>,
    /// Set instead of `code`/`scope` when the broadcaster declines.
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// GET /userauth/start - Redirect the broadcaster to Twitch
pub async fn start_auth(State(state): State<AppState>) -> Redirect {
    let url = state.authorization.start_auth();
    Redirect::to(url.as_str())
}

/// GET /userauth/finish - Verify the redirect back from Twitch
pub async fn finish_auth(
    State(state): State<AppState>,
    Query(params): Query<FinishAuthParams>,
) -> Result<Html<&'static str>, UserAuthApiError> {
    if let Some(error) = &params.error {
        tracing::warn!(
            error = %error,
            description = params.error_description.as_deref().unwrap_or_default(),
            "Twitch reported authorization failure"
        );
    }

    state
        .authorization
        .finish_auth(params.state.as_deref(), params.scope.as_deref())?;
    Ok(Html(SUCCESS_PAGE))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that renders authorization failures as plain text.
#[derive(Debug)]
pub struct UserAuthApiError(AuthFlowError);

impl From<AuthFlowError> for UserAuthApiError {
    fn from(err: AuthFlowError) -> Self {
        Self(err)
    }
}

impl IntoResponse for UserAuthApiError {
    fn into_response(self) -> Response {
        (
            self.0.status_code(),
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.0.to_string(),
        )
            .into_response()
    }
}
