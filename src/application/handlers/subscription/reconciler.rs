//! SubscriptionReconciler - Keeps registered subscriptions in line with the
//! declared catalog.
//!
//! All three operations start by computing the current [`Status`]:
//!
//! - `status` returns it.
//! - `reconcile` creates every required subscription reported `missing`.
//!   Registered but unhealthy subscriptions are left alone.
//! - `purge` deletes every subscription this service owns, required or not.
//!
//! Provider calls are issued one at a time. The first failure aborts the
//! operation; work already done is not rolled back, so callers re-run
//! `status`/`reconcile` to observe and repair partial state.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

use crate::domain::subscription::{
    reconcile_status, ConditionParams, ReconcileError, RegisteredSubscription,
    RequiredSubscriptions, Status, Transport,
};
use crate::ports::{CreateSubscriptionRequest, EventSubClient, ProviderError};

/// Result of a successful `reconcile`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileResult {
    pub created: usize,
}

/// Result of a successful `purge`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurgeResult {
    pub deleted: usize,
}

pub struct SubscriptionReconciler {
    client: Arc<dyn EventSubClient>,
    params: ConditionParams,
    required: RequiredSubscriptions,
    callback_url: String,
    webhook_secret: SecretString,
}

impl SubscriptionReconciler {
    pub fn new(
        client: Arc<dyn EventSubClient>,
        params: ConditionParams,
        required: RequiredSubscriptions,
        callback_url: impl Into<String>,
        webhook_secret: SecretString,
    ) -> Self {
        Self {
            client,
            params,
            required,
            callback_url: callback_url.into(),
            webhook_secret,
        }
    }

    pub fn callback_url(&self) -> &str {
        &self.callback_url
    }

    /// Reports every required subscription and every owned ancillary one.
    pub async fn status(&self) -> Result<Status, ReconcileError> {
        let owned = self.owned_subscriptions().await?;
        let status = reconcile_status(owned, &self.params, &self.required)?;
        tracing::debug!(
            ok = status.ok,
            subscriptions = status.subscriptions.len(),
            "Resolved EventSub subscription status"
        );
        Ok(status)
    }

    /// Creates each required subscription that is missing.
    pub async fn reconcile(&self) -> Result<ReconcileResult, ReconcileError> {
        let status = self.status().await?;

        let mut created = 0;
        for state in status.required().filter(|s| s.is_missing()) {
            let request = CreateSubscriptionRequest {
                subscription_type: state.subscription_type.clone(),
                version: state.version.clone(),
                condition: state.condition.clone(),
                transport: Transport::webhook(
                    self.callback_url.clone(),
                    self.webhook_secret.expose_secret().clone(),
                ),
            };

            if let Err(e) = self.client.create_subscription(request).await {
                tracing::error!(
                    error = %e,
                    subscription_type = %state.subscription_type,
                    subscription_version = %state.version,
                    subscription_condition = ?state.condition.fields(),
                    "Failed to create EventSub subscription"
                );
                return Err(e.into());
            }

            tracing::info!(
                subscription_type = %state.subscription_type,
                subscription_version = %state.version,
                subscription_condition = ?state.condition.fields(),
                "Created new EventSub subscription"
            );
            created += 1;
        }

        Ok(ReconcileResult { created })
    }

    /// Deletes every subscription owned by this service's callback URL.
    pub async fn purge(&self) -> Result<PurgeResult, ReconcileError> {
        let status = self.status().await?;

        let mut deleted = 0;
        for state in status.subscriptions.iter().filter(|s| s.is_registered()) {
            if let Err(e) = self.client.delete_subscription(&state.subscription_id).await {
                tracing::error!(
                    error = %e,
                    subscription_id = %state.subscription_id,
                    subscription_type = %state.subscription_type,
                    subscription_version = %state.version,
                    "Failed to delete EventSub subscription"
                );
                return Err(e.into());
            }

            tracing::info!(
                subscription_id = %state.subscription_id,
                subscription_type = %state.subscription_type,
                subscription_version = %state.version,
                required = state.required,
                "Deleted EventSub subscription"
            );
            deleted += 1;
        }

        Ok(PurgeResult { deleted })
    }

    /// Lists all pages, keeping only webhook subscriptions to our callback.
    async fn owned_subscriptions(&self) -> Result<Vec<RegisteredSubscription>, ProviderError> {
        let user_id = self.params.channel_user_id.as_str();
        let mut owned = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let page = self
                .client
                .list_subscriptions(user_id, cursor.as_deref())
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, "Failed to list EventSub subscriptions");
                    e
                })?;

            owned.extend(
                page.subscriptions
                    .into_iter()
                    .filter(|s| s.is_owned_by(&self.callback_url)),
            );

            match page.cursor.filter(|c| !c.is_empty()) {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        Ok(owned)
    }
}
