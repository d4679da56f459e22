//! AuthorizationFlow - Broadcaster-facing OAuth authorization handshake.
//!
//! `start_auth` sends the broadcaster to Twitch to grant every scope the
//! subscription catalog needs; `finish_auth` checks the redirect back. The
//! authorization code itself is discarded: the grant recorded on Twitch's
//! side is what lets the app-token subscriptions be created afterwards.

use std::sync::Arc;

use url::Url;

use crate::domain::userauth::{AuthFlowError, CsrfTokenStore};

/// Path appended to the service origin for the redirect back from Twitch.
pub const FINISH_PATH: &str = "/userauth/finish";

pub struct AuthorizationFlow {
    csrf: Arc<CsrfTokenStore>,
    authorize_url: Url,
    client_id: String,
    redirect_uri: String,
    required_scopes: Vec<String>,
}

impl AuthorizationFlow {
    /// Builds the flow for a service reachable at `origin`.
    ///
    /// # Errors
    ///
    /// Returns an error if `id_base_url` does not yield a valid URL.
    pub fn new(
        csrf: Arc<CsrfTokenStore>,
        id_base_url: &str,
        client_id: impl Into<String>,
        origin: &str,
        required_scopes: Vec<String>,
    ) -> Result<Self, url::ParseError> {
        let authorize_url = Url::parse(&format!(
            "{}/oauth2/authorize",
            id_base_url.trim_end_matches('/')
        ))?;
        Ok(Self {
            csrf,
            authorize_url,
            client_id: client_id.into(),
            redirect_uri: format!("{}{}", origin.trim_end_matches('/'), FINISH_PATH),
            required_scopes,
        })
    }

    pub fn required_scopes(&self) -> &[String] {
        &self.required_scopes
    }

    /// Issues a CSRF token and returns the URL to redirect the browser to.
    pub fn start_auth(&self) -> Url {
        let state = self.csrf.issue();

        let mut url = self.authorize_url.clone();
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("scope", &self.required_scopes.join(" "))
            .append_pair("state", &state);

        tracing::info!(scopes = ?self.required_scopes, "Starting user authorization");
        url
    }

    /// Verifies the `state` and `scope` query values Twitch redirected with.
    ///
    /// The CSRF token is consumed before scopes are checked, so a redirect
    /// can only be evaluated once.
    pub fn finish_auth(&self, state: Option<&str>, scope: Option<&str>) -> Result<(), AuthFlowError> {
        let state = state.filter(|s| !s.is_empty()).ok_or(AuthFlowError::MissingState)?;
        if !self.csrf.consume(state) {
            tracing::warn!("Rejected user authorization with invalid CSRF token");
            return Err(AuthFlowError::CsrfInvalid);
        }

        let scope = scope.filter(|s| !s.is_empty()).ok_or(AuthFlowError::MissingScope)?;
        let granted: Vec<&str> = scope.split(' ').collect();

        if let Some(missing) = self
            .required_scopes
            .iter()
            .find(|required| !granted.contains(&required.as_str()))
        {
            tracing::warn!(scope = %missing, "Required scope was not granted");
            return Err(AuthFlowError::ScopeNotGranted(missing.clone()));
        }

        tracing::info!(scopes = ?granted, "User authorization complete");
        Ok(())
    }
}
