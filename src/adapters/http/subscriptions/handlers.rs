//! HTTP handlers for subscription management.
//!
//! All routes are broadcaster-only; see `middleware::require_broadcaster`.

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::dto::ErrorResponse;
use crate::adapters::http::AppState;
use crate::domain::subscription::ReconcileError;

/// GET /subscriptions - Report required and ancillary subscriptions
pub async fn get_status(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, SubscriptionsApiError> {
    let status = state.reconciler.status().await?;
    Ok(Json(status))
}

/// PATCH /subscriptions - Create missing required subscriptions
pub async fn reconcile(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, SubscriptionsApiError> {
    let result = state.reconciler.reconcile().await?;
    tracing::info!(created = result.created, "Reconciled EventSub subscriptions");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /subscriptions - Delete every owned subscription
pub async fn purge(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, SubscriptionsApiError> {
    let result = state.reconciler.purge().await?;
    tracing::info!(deleted = result.deleted, "Purged EventSub subscriptions");
    Ok(StatusCode::NO_CONTENT)
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts reconciliation errors to HTTP responses.
#[derive(Debug)]
pub struct SubscriptionsApiError(ReconcileError);

impl From<ReconcileError> for SubscriptionsApiError {
    fn from(err: ReconcileError) -> Self {
        Self(err)
    }
}

impl IntoResponse for SubscriptionsApiError {
    fn into_response(self) -> axum::response::Response {
        let error = ErrorResponse::new(self.0.error_code(), self.0.to_string())
            .with_upstream_status(self.0.upstream_status());
        (self.0.status_code(), Json(error)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::subscription::TemplateError;
    use crate::ports::ProviderError;
    use http_body_util::BodyExt;

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn provider_error_is_500_with_upstream_message() {
        let err = SubscriptionsApiError::from(ReconcileError::from(ProviderError::api(
            403,
            "subscription missing proper authorization",
        )));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["error_code"], "PROVIDER_API_ERROR");
        assert_eq!(json["upstream_status"], 403);
        assert!(json["message"]
            .as_str()
            .unwrap()
            .contains("subscription missing proper authorization"));
    }

    #[tokio::test]
    async fn template_error_is_500() {
        let err = SubscriptionsApiError::from(ReconcileError::from(TemplateError::unknown_field(
            "broadcaster_user_id",
            "{{channel_id}}",
        )));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["error_code"], "TEMPLATE_ERROR");
        assert!(json.get("upstream_status").is_none());
    }
}
