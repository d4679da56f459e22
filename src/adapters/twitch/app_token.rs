//! App access token via the OAuth client-credentials grant.
//!
//! The token is fetched lazily and cached until shortly before it expires.
//! A 401 from Helix invalidates it so the next call fetches a fresh one.

use std::sync::Arc;
use std::time::{Duration, Instant};

use secrecy::{ExposeSecret, SecretString};
use tokio::sync::RwLock;

use super::api_types::{ErrorBody, TokenResponse};
use crate::ports::ProviderError;

/// Tokens are refreshed this long before Twitch would expire them.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Upper bound on how long a token is cached, whatever the endpoint claims.
const MAX_CACHE_LIFETIME: Duration = Duration::from_secs(90 * 24 * 60 * 60);

struct CachedToken {
    value: String,
    refresh_at: Instant,
}

impl CachedToken {
    fn is_stale(&self) -> bool {
        Instant::now() >= self.refresh_at
    }
}

/// When a token reported to live `expires_in` seconds should be refreshed.
fn refresh_deadline(now: Instant, expires_in: u64) -> Instant {
    let lifetime = Duration::from_secs(expires_in)
        .min(MAX_CACHE_LIFETIME)
        .saturating_sub(EXPIRY_MARGIN);
    now.checked_add(lifetime).unwrap_or(now)
}

pub(super) struct AppTokenSource {
    http: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: SecretString,
    cache: Arc<RwLock<Option<CachedToken>>>,
}

impl AppTokenSource {
    pub fn new(
        http: reqwest::Client,
        id_base_url: &str,
        client_id: impl Into<String>,
        client_secret: SecretString,
    ) -> Self {
        Self {
            http,
            token_url: format!("{}/oauth2/token", id_base_url.trim_end_matches('/')),
            client_id: client_id.into(),
            client_secret,
            cache: Arc::new(RwLock::new(None)),
        }
    }

    /// Returns a valid app access token, fetching one if needed.
    pub async fn token(&self) -> Result<String, ProviderError> {
        {
            let cache = self.cache.read().await;
            if let Some(ref cached) = *cache {
                if !cached.is_stale() {
                    return Ok(cached.value.clone());
                }
            }
        }

        let mut cache = self.cache.write().await;
        // Another task may have refreshed while we waited for the lock
        if let Some(ref cached) = *cache {
            if !cached.is_stale() {
                return Ok(cached.value.clone());
            }
        }

        let fetched = self.fetch().await?;
        let value = fetched.access_token;
        *cache = Some(CachedToken {
            value: value.clone(),
            refresh_at: refresh_deadline(Instant::now(), fetched.expires_in),
        });
        Ok(value)
    }

    /// Drops the cached token.
    pub async fn invalidate(&self) {
        *self.cache.write().await = None;
    }

    async fn fetch(&self) -> Result<TokenResponse, ProviderError> {
        tracing::debug!(url = %self.token_url, "Requesting app access token");

        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.expose_secret().as_str()),
                ("grant_type", "client_credentials"),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to request app access token");
                ProviderError::Authentication(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = ErrorBody::describe(&body);
            tracing::error!(status = status.as_u16(), message = %message, "App access token request rejected");
            return Err(ProviderError::Authentication(format!(
                "got response {}: {}",
                status.as_u16(),
                message
            )));
        }

        response
            .json::<TokenResponse>()
            .await
            .map_err(|e| ProviderError::Authentication(format!("invalid token response: {}", e)))
    }
}
