//! Broadcaster authorization middleware for axum.
//!
//! The middleware uses the `AccessValidator` port, keeping it agnostic of the
//! token scheme. On success the resolved [`Principal`] is injected into the
//! request extensions for handlers that want it.
//!
//! ```text
//! Request → require_broadcaster → injects Principal into extensions
//!                                      ↓
//!                                  Handler
//! ```
//!
//! # Example
//!
//! ```ignore
//! let validator: Arc<dyn AccessValidator> = Arc::new(MockAccessValidator::new());
//!
//! let app = Router::new()
//!     .route("/subscriptions", get(get_status))
//!     .route_layer(middleware::from_fn_with_state(validator, require_broadcaster));
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::dto::ErrorResponse;
use crate::domain::access::{AccessError, Role};
use crate::ports::AccessValidator;

/// Auth middleware state - wraps the access validator.
pub type AccessState = Arc<dyn AccessValidator>;

/// Rejects any request not carrying a broadcaster bearer token.
///
/// Expects the token in the `Authorization` header with `Bearer` prefix:
/// ```text
/// Authorization: Bearer <token>
/// ```
pub async fn require_broadcaster(
    State(validator): State<AccessState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    let Some(token) = token else {
        return AccessRejection(AccessError::MissingToken).into_response();
    };

    match validator.validate(token).await {
        Ok(principal) if principal.has_role(Role::Broadcaster) => {
            request.extensions_mut().insert(principal);
            next.run(request).await
        }
        Ok(principal) => {
            tracing::warn!(principal = %principal.name, role = principal.role.as_str(), "Rejected admin request from non-broadcaster");
            AccessRejection(AccessError::insufficient_role(Role::Broadcaster)).into_response()
        }
        Err(e) => {
            if let AccessError::ServiceUnavailable(msg) = &e {
                tracing::error!("Access validation unavailable: {}", msg);
            }
            AccessRejection(e).into_response()
        }
    }
}

/// Rejection type for access failures.
#[derive(Debug, Clone)]
pub struct AccessRejection(pub AccessError);

impl IntoResponse for AccessRejection {
    fn into_response(self) -> Response {
        let error = ErrorResponse::new(self.0.error_code(), self.0.to_string());
        (self.0.status_code(), Json(error)).into_response()
    }
}
