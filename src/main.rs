//! Service entrypoint: load configuration, wire adapters, serve HTTP.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use eventsub_hooks::adapters::{
    app_router, AppState, HelixClient, HelixConfig, RedisEventPublisher, StaticTokenValidator,
};
use eventsub_hooks::application::{
    AuthorizationFlow, EventTranslator, SubscriptionReconciler, WebhookDispatcher,
};
use eventsub_hooks::config::{AppConfig, ServerConfig};
use eventsub_hooks::domain::subscription::{ConditionParams, RequiredSubscriptions};
use eventsub_hooks::domain::userauth::CsrfTokenStore;
use eventsub_hooks::domain::webhook::HmacSignatureVerifier;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.server);
    config.validate().context("Invalid configuration")?;

    // Twitch API client, authenticated with an app access token
    let helix = Arc::new(
        HelixClient::new(HelixConfig {
            api_base_url: config.twitch.api_base_url.clone(),
            id_base_url: config.twitch.id_base_url.clone(),
            client_id: config.twitch.client_id.clone(),
            client_secret: config.twitch.client_secret.clone(),
        })
        .context("Failed to initialize Twitch API client")?,
    );

    let channel_user_id = match config.twitch.channel_user_id() {
        Some(id) => id.to_string(),
        None => helix
            .resolve_user_id(&config.twitch.channel_name)
            .await
            .with_context(|| {
                format!(
                    "Failed to resolve Twitch user ID for channel '{}'",
                    config.twitch.channel_name
                )
            })?,
    };
    tracing::info!(
        channel_name = %config.twitch.channel_name,
        channel_user_id = %channel_user_id,
        "Initialized broadcaster channel details"
    );

    let publisher = Arc::new(
        RedisEventPublisher::connect(&config.redis.url, config.redis.channel.clone())
            .await
            .context("Failed to connect to Redis")?,
    );

    let required = RequiredSubscriptions::catalog();
    let required_scopes = required.required_scopes();

    let reconciler = SubscriptionReconciler::new(
        helix,
        ConditionParams::new(channel_user_id),
        required,
        config.server.callback_url(),
        config.twitch.webhook_secret.clone(),
    );

    let dispatcher = WebhookDispatcher::new(
        Arc::new(HmacSignatureVerifier::new(config.twitch.webhook_secret.clone())),
        Arc::new(EventTranslator::new(publisher)),
    );

    let authorization = AuthorizationFlow::new(
        Arc::new(CsrfTokenStore::new()),
        &config.twitch.id_base_url,
        config.twitch.client_id.clone(),
        config.server.origin(),
        required_scopes,
    )
    .context("Failed to build authorization URL")?;

    let state = AppState {
        reconciler: Arc::new(reconciler),
        dispatcher: Arc::new(dispatcher),
        authorization: Arc::new(authorization),
        access_validator: Arc::new(StaticTokenValidator::new(
            config.auth.broadcaster_token.clone(),
            config.twitch.channel_name.clone(),
        )),
    };

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(
        %addr,
        callback_url = %config.server.callback_url(),
        "EventSub hooks service listening"
    );

    axum::serve(listener, app_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("Shut down cleanly");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    if server.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .pretty()
            .with_env_filter(filter)
            .init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
