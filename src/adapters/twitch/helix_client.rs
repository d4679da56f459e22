//! Twitch Helix adapter for the `EventSubClient` port.
//!
//! Every request carries the `Client-Id` header and an app access token.
//! Non-success statuses are surfaced as `ProviderError::Api` with the
//! message from Twitch's error body.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::SecretString;

use super::api_types::{ErrorBody, SubscriptionsResponse, UsersResponse};
use super::app_token::AppTokenSource;
use crate::ports::{CreateSubscriptionRequest, EventSubClient, ProviderError, SubscriptionPage};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for the Helix API.
#[derive(Debug, Clone)]
pub struct HelixConfig {
    /// e.g. `https://api.twitch.tv/helix`
    pub api_base_url: String,
    /// e.g. `https://id.twitch.tv`
    pub id_base_url: String,
    pub client_id: String,
    pub client_secret: SecretString,
}

pub struct HelixClient {
    http: reqwest::Client,
    api_base_url: String,
    client_id: String,
    tokens: AppTokenSource,
}

impl HelixClient {
    /// Creates a client. No request is made until first use.
    pub fn new(config: HelixConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ProviderError::transport(format!("failed to create HTTP client: {}", e)))?;

        let tokens = AppTokenSource::new(
            http.clone(),
            &config.id_base_url,
            config.client_id.clone(),
            config.client_secret,
        );

        Ok(Self {
            http,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            client_id: config.client_id,
            tokens,
        })
    }

    /// Looks up the Twitch user ID for a channel login name.
    pub async fn resolve_user_id(&self, login: &str) -> Result<String, ProviderError> {
        let request = self
            .http
            .get(self.url("/users"))
            .query(&[("login", login)]);
        let response = self.send(request, StatusCode::OK).await?;

        let users: UsersResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::decode(e.to_string()))?;

        users
            .data
            .into_iter()
            .find(|u| u.login.eq_ignore_ascii_case(login))
            .map(|u| u.id)
            .ok_or_else(|| ProviderError::api(404, format!("no Twitch user with login '{}'", login)))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }

    /// Authorizes and sends a request, requiring `expected` as the status.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        expected: StatusCode,
    ) -> Result<reqwest::Response, ProviderError> {
        let token = self.tokens.token().await?;

        let response = request
            .header("Client-Id", &self.client_id)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ProviderError::transport(e.to_string()))?;

        let status = response.status();
        if status == expected {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            self.tokens.invalidate().await;
        }

        let body = response.text().await.unwrap_or_default();
        Err(ProviderError::api(status.as_u16(), ErrorBody::describe(&body)))
    }
}

#[async_trait]
impl EventSubClient for HelixClient {
    async fn list_subscriptions(
        &self,
        user_id: &str,
        after: Option<&str>,
    ) -> Result<SubscriptionPage, ProviderError> {
        let mut request = self
            .http
            .get(self.url("/eventsub/subscriptions"))
            .query(&[("user_id", user_id)]);
        if let Some(cursor) = after {
            request = request.query(&[("after", cursor)]);
        }

        let response = self.send(request, StatusCode::OK).await?;
        let body: SubscriptionsResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::decode(e.to_string()))?;

        let subscriptions = body
            .data
            .into_iter()
            .map(|mut s| {
                // Helix reports unused condition fields as empty strings
                s.condition = s.condition.normalized();
                s
            })
            .collect();

        Ok(SubscriptionPage {
            subscriptions,
            cursor: body.pagination.cursor.filter(|c| !c.is_empty()),
        })
    }

    async fn create_subscription(
        &self,
        request: CreateSubscriptionRequest,
    ) -> Result<(), ProviderError> {
        let request = self
            .http
            .post(self.url("/eventsub/subscriptions"))
            .json(&request);
        self.send(request, StatusCode::ACCEPTED).await?;
        Ok(())
    }

    async fn delete_subscription(&self, subscription_id: &str) -> Result<(), ProviderError> {
        let request = self
            .http
            .delete(self.url("/eventsub/subscriptions"))
            .query(&[("id", subscription_id)]);
        self.send(request, StatusCode::NO_CONTENT).await?;
        Ok(())
    }
}
