//! Shared fixtures for the HTTP integration tests.
//!
//! Each test builds the full router over in-memory adapters, so requests
//! travel the same path as in production: routing, middleware, handlers,
//! application services and domain logic.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use secrecy::SecretString;

use eventsub_hooks::adapters::{app_router, AppState, InMemoryEventPublisher, MockAccessValidator};
use eventsub_hooks::application::{
    AuthorizationFlow, EventTranslator, SubscriptionReconciler, WebhookDispatcher,
};
use eventsub_hooks::domain::subscription::{
    ConditionParams, RegisteredSubscription, RequiredSubscriptions, Transport,
};
use eventsub_hooks::domain::userauth::CsrfTokenStore;
use eventsub_hooks::domain::webhook::HmacSignatureVerifier;
use eventsub_hooks::ports::{
    CreateSubscriptionRequest, EventSubClient, ProviderError, SubscriptionPage,
};

pub const CHANNEL_USER_ID: &str = "1337";
pub const ORIGIN: &str = "https://hooks.example.com";
pub const CALLBACK_URL: &str = "https://hooks.example.com/callback";
pub const WEBHOOK_SECRET: &str = "my-cool-webhook-secret";
pub const BROADCASTER_TOKEN: &str = "broadcaster-token";
pub const VIEWER_TOKEN: &str = "viewer-token";

// ════════════════════════════════════════════════════════════════════════════════
// Fake EventSub API
// ════════════════════════════════════════════════════════════════════════════════

/// In-memory EventSub registry with one-entry pages.
///
/// Newly created subscriptions come back as `enabled`, as if the callback
/// verification had already happened.
#[derive(Default)]
pub struct FakeEventSub {
    registered: Mutex<Vec<RegisteredSubscription>>,
    next_id: Mutex<u32>,
    fail_create: Mutex<Option<ProviderError>>,
    deleted: Mutex<Vec<String>>,
    create_delay: Option<Duration>,
}

impl FakeEventSub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registered(self, subscription: RegisteredSubscription) -> Self {
        self.registered.lock().unwrap().push(subscription);
        self
    }

    /// Makes every create call take `delay` before it is applied.
    pub fn with_create_delay(mut self, delay: Duration) -> Self {
        self.create_delay = Some(delay);
        self
    }

    pub fn fail_creates_with(&self, error: ProviderError) {
        *self.fail_create.lock().unwrap() = Some(error);
    }

    pub fn registered(&self) -> Vec<RegisteredSubscription> {
        self.registered.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventSubClient for FakeEventSub {
    async fn list_subscriptions(
        &self,
        _user_id: &str,
        after: Option<&str>,
    ) -> Result<SubscriptionPage, ProviderError> {
        let registered = self.registered.lock().unwrap();
        let index: usize = after.map_or(0, |c| c.parse().unwrap());
        let subscriptions: Vec<_> = registered.iter().skip(index).take(1).cloned().collect();
        let cursor = (index + 1 < registered.len()).then(|| (index + 1).to_string());
        Ok(SubscriptionPage {
            subscriptions,
            cursor,
        })
    }

    async fn create_subscription(
        &self,
        request: CreateSubscriptionRequest,
    ) -> Result<(), ProviderError> {
        if let Some(delay) = self.create_delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(error) = self.fail_create.lock().unwrap().clone() {
            return Err(error);
        }

        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        self.registered.lock().unwrap().push(RegisteredSubscription {
            id: format!("created-{}", next_id),
            subscription_type: request.subscription_type,
            version: request.version,
            status: "enabled".to_string(),
            condition: request.condition,
            transport: Transport {
                method: request.transport.method,
                callback: request.transport.callback,
                secret: None,
            },
            created_at: None,
        });
        Ok(())
    }

    async fn delete_subscription(&self, subscription_id: &str) -> Result<(), ProviderError> {
        let mut registered = self.registered.lock().unwrap();
        let before = registered.len();
        registered.retain(|s| s.id != subscription_id);
        if registered.len() == before {
            return Err(ProviderError::api(404, "subscription not found"));
        }
        self.deleted.lock().unwrap().push(subscription_id.to_string());
        Ok(())
    }
}

/// A registered subscription pushing to `callback`.
pub fn registered(
    id: &str,
    subscription_type: &str,
    version: &str,
    status: &str,
    callback: &str,
) -> RegisteredSubscription {
    RegisteredSubscription {
        id: id.to_string(),
        subscription_type: subscription_type.to_string(),
        version: version.to_string(),
        status: status.to_string(),
        condition: eventsub_hooks::domain::subscription::Condition::for_broadcaster(
            CHANNEL_USER_ID,
        ),
        transport: Transport {
            method: "webhook".to_string(),
            callback: Some(callback.to_string()),
            secret: None,
        },
        created_at: None,
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Application
// ════════════════════════════════════════════════════════════════════════════════

pub struct TestApp {
    pub router: Router,
    pub eventsub: Arc<FakeEventSub>,
    pub publisher: Arc<InMemoryEventPublisher>,
}

impl TestApp {
    pub fn new(eventsub: FakeEventSub, required: RequiredSubscriptions) -> Self {
        let eventsub = Arc::new(eventsub);
        let publisher = Arc::new(InMemoryEventPublisher::new());
        let secret = SecretString::new(WEBHOOK_SECRET.to_string());

        let required_scopes = required.required_scopes();
        let reconciler = SubscriptionReconciler::new(
            eventsub.clone(),
            ConditionParams::new(CHANNEL_USER_ID),
            required,
            CALLBACK_URL,
            secret.clone(),
        );
        let dispatcher = WebhookDispatcher::new(
            Arc::new(HmacSignatureVerifier::new(secret)),
            Arc::new(EventTranslator::new(publisher.clone())),
        );
        let authorization = AuthorizationFlow::new(
            Arc::new(CsrfTokenStore::new()),
            "https://id.twitch.tv",
            "my-client-id",
            ORIGIN,
            required_scopes,
        )
        .unwrap();
        let access_validator = MockAccessValidator::new()
            .with_broadcaster(BROADCASTER_TOKEN, "cool_user")
            .with_viewer(VIEWER_TOKEN, "some_viewer");

        let router = app_router(AppState {
            reconciler: Arc::new(reconciler),
            dispatcher: Arc::new(dispatcher),
            authorization: Arc::new(authorization),
            access_validator: Arc::new(access_validator),
        });

        Self {
            router,
            eventsub,
            publisher,
        }
    }

    pub fn with_catalog(eventsub: FakeEventSub) -> Self {
        Self::new(eventsub, RequiredSubscriptions::catalog())
    }

    /// Sends a request through a clone of the router.
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        use tower::ServiceExt;
        self.router.clone().oneshot(request).await.unwrap()
    }
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}
