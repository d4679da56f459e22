//! Helix wire types.

use serde::Deserialize;

use crate::domain::subscription::RegisteredSubscription;

/// Response of the client-credentials token grant.
#[derive(Debug, Deserialize)]
pub(super) struct TokenResponse {
    pub access_token: String,
    /// Lifetime in seconds.
    pub expires_in: u64,
}

/// `GET /eventsub/subscriptions` response.
#[derive(Debug, Deserialize)]
pub(super) struct SubscriptionsResponse {
    #[serde(default)]
    pub data: Vec<RegisteredSubscription>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct Pagination {
    #[serde(default)]
    pub cursor: Option<String>,
}

/// `GET /users` response.
#[derive(Debug, Deserialize)]
pub(super) struct UsersResponse {
    #[serde(default)]
    pub data: Vec<HelixUser>,
}

#[derive(Debug, Deserialize)]
pub(super) struct HelixUser {
    pub id: String,
    pub login: String,
}

/// Error body Helix and the identity service return on failure.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Best available description; falls back to the raw body.
    pub fn describe(body: &str) -> String {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(ErrorBody {
                message: Some(message),
                ..
            }) if !message.is_empty() => message,
            Ok(ErrorBody {
                error: Some(error), ..
            }) if !error.is_empty() => error,
            _ => body.trim().to_string(),
        }
    }
}
