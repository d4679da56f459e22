//! HTTP handler for EventSub webhook deliveries.
//!
//! No authentication layer: deliveries are authenticated by their HMAC
//! signature inside the dispatcher.

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::adapters::http::dto::ErrorResponse;
use crate::adapters::http::AppState;
use crate::application::{DeliveryOutcome, HandleDeliveryCommand};
use crate::domain::webhook::{
    DeliveryHeaders, WebhookError, HEADER_MESSAGE_ID, HEADER_MESSAGE_SIGNATURE,
    HEADER_MESSAGE_TIMESTAMP, HEADER_MESSAGE_TYPE,
};

/// POST /callback - Receive a delivery from Twitch
pub async fn handle_callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, CallbackApiError> {
    let cmd = HandleDeliveryCommand {
        headers: delivery_headers(&headers),
        body: body.to_vec(),
    };

    let response = match state.dispatcher.handle(cmd).await? {
        DeliveryOutcome::Challenge(challenge) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            challenge,
        )
            .into_response(),
        DeliveryOutcome::Handled | DeliveryOutcome::Revoked => StatusCode::OK.into_response(),
    };
    Ok(response)
}

/// Extracts the EventSub headers; values that are not valid UTF-8 count as absent.
pub fn delivery_headers(headers: &HeaderMap) -> DeliveryHeaders {
    let get = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    DeliveryHeaders {
        message_id: get(HEADER_MESSAGE_ID),
        timestamp: get(HEADER_MESSAGE_TIMESTAMP),
        signature: get(HEADER_MESSAGE_SIGNATURE),
        message_type: get(HEADER_MESSAGE_TYPE),
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts webhook errors to HTTP responses.
///
/// 4xx tells Twitch not to redeliver; 5xx lets its retry policy take over.
#[derive(Debug)]
pub struct CallbackApiError(WebhookError);

impl From<WebhookError> for CallbackApiError {
    fn from(err: WebhookError) -> Self {
        Self(err)
    }
}

impl IntoResponse for CallbackApiError {
    fn into_response(self) -> Response {
        let error = ErrorResponse::new(self.0.error_code(), self.0.to_string());
        (self.0.status_code(), Json(error)).into_response()
    }
}
