//! Dispatch orchestration.
//!
//! One call to [`Dispatcher::handle`] takes an event from `Received` to a
//! terminal state: `Delivered`, `Dropped`, or `Failed`. Every failure is
//! reduced to a log entry here; nothing raises back into the platform's
//! trigger interface, because an unhandled error would make the platform
//! treat the event as unprocessed.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use uuid::Uuid;

use modrelay_core::{ContentSource, RelayError, RelaySettings, SettingsSource};
use modrelay_events::ModEvent;
use modrelay_webhooks::{
    DeliveryClient, HttpTransport, LinearBackoff, NotificationPayload, RateLimit, RetryStrategy,
    SlidingWindowLimiter, WebhookDestination, WebhookError, WebhookTransport, redact_url, router,
};

use crate::embeds::{RELAY_USERNAME, render};
use crate::format::format_subreddit;
use crate::visibility::{VisibilityConfig, VisibilityGate};

/// Why a dispatch was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Category not in the monitored set.
    NotMonitored,
    /// No webhook configured for the category.
    NoDestination,
    /// Content did not survive automated filtering.
    NotVisible,
    /// Destination window is full.
    RateLimited,
}

/// Terminal state of one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The provider accepted the notification.
    Delivered,
    /// The dispatch ended without a delivery attempt.
    Dropped(DropReason),
    /// Delivery (or a prerequisite lookup) failed; logged and swallowed.
    Failed,
}

/// Error surfaced by the manual test-notification action.
///
/// This is the one path where an operator sees a failure synchronously;
/// the automated pipeline only ever logs.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The primary webhook is not configured.
    #[error("No primary webhook configured")]
    NoPrimaryWebhook,

    /// Settings or content lookup failed.
    #[error(transparent)]
    Settings(#[from] RelayError),

    /// The delivery itself failed.
    #[error(transparent)]
    Delivery(#[from] WebhookError),
}

/// Orchestrates the notification pipeline for incoming events.
pub struct Dispatcher<S, T, R>
where
    S: ContentSource,
    T: WebhookTransport,
    R: RetryStrategy,
{
    settings: Arc<dyn SettingsSource>,
    source: Arc<S>,
    gate: VisibilityGate<S>,
    client: DeliveryClient<T, R>,
    limiter: Mutex<SlidingWindowLimiter>,
}

impl<S: ContentSource> Dispatcher<S, HttpTransport, LinearBackoff> {
    /// Creates a dispatcher with production delivery, gating, and rate
    /// limiting defaults.
    pub fn new(settings: Arc<dyn SettingsSource>, source: Arc<S>) -> Self {
        Self::with_components(
            settings,
            source,
            DeliveryClient::new(),
            VisibilityConfig::default(),
            RateLimit::default(),
        )
    }
}

impl<S, T, R> Dispatcher<S, T, R>
where
    S: ContentSource,
    T: WebhookTransport,
    R: RetryStrategy,
{
    /// Creates a dispatcher from explicit components.
    pub fn with_components(
        settings: Arc<dyn SettingsSource>,
        source: Arc<S>,
        client: DeliveryClient<T, R>,
        visibility: VisibilityConfig,
        rate_limit: RateLimit,
    ) -> Self {
        Self {
            gate: VisibilityGate::with_config(source.clone(), visibility),
            limiter: Mutex::new(SlidingWindowLimiter::with_limit(rate_limit)),
            settings,
            source,
            client,
        }
    }

    /// Runs one event through the pipeline to a terminal state.
    ///
    /// Never returns an error: every terminal condition is reduced to a
    /// log entry and an outcome value.
    pub async fn handle(&self, event: ModEvent) -> DispatchOutcome {
        let dispatch_id = Uuid::new_v4();
        let category = event.category();
        tracing::debug!(%dispatch_id, event = %event.describe(), %category, "Event received");

        let settings = match RelaySettings::load(self.settings.as_ref()).await {
            Ok(settings) => settings,
            Err(e) => {
                tracing::error!(%dispatch_id, error = %e, "Failed to load settings");
                return DispatchOutcome::Failed;
            }
        };

        if !settings.is_monitored(category) {
            tracing::debug!(%dispatch_id, %category, "Category not monitored");
            return DispatchOutcome::Dropped(DropReason::NotMonitored);
        }

        let Some(destination) = router::resolve(&settings, category) else {
            tracing::debug!(%dispatch_id, %category, "No webhook configured for category");
            return DispatchOutcome::Dropped(DropReason::NoDestination);
        };

        // Visibility gating applies to new posts and comments only; the
        // other categories describe content that is already actioned.
        let visible = match &event {
            ModEvent::PostSubmit { post_id, .. } => {
                self.gate.should_notify_post(post_id, &settings).await
            }
            ModEvent::CommentSubmit {
                comment_id,
                post_id,
                ..
            } => {
                self.gate
                    .should_notify_comment(comment_id, post_id, &settings)
                    .await
            }
            _ => true,
        };
        if !visible {
            tracing::info!(%dispatch_id, event = %event.describe(), "Suppressed: content not visible");
            return DispatchOutcome::Dropped(DropReason::NotVisible);
        }

        let payload = match render(&event, self.source.as_ref(), &settings).await {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(%dispatch_id, error = %e, "Failed to render notification");
                return DispatchOutcome::Failed;
            }
        };

        // Evict-then-append on the window must stay a critical section per
        // destination when the host delivers events concurrently.
        {
            let mut limiter = self.limiter.lock().await;
            if !limiter.admit(destination.rate_key()) {
                tracing::warn!(
                    %dispatch_id,
                    destination = %redact_url(destination.rate_key()),
                    "Throttled: destination window is full"
                );
                return DispatchOutcome::Dropped(DropReason::RateLimited);
            }
        }

        match self.client.deliver(&destination, &payload).await {
            Ok(()) => {
                tracing::info!(%dispatch_id, %category, "Notification delivered");
                DispatchOutcome::Delivered
            }
            Err(e) => {
                tracing::error!(
                    %dispatch_id,
                    destination = %redact_url(&destination.base_url),
                    error = %e,
                    "Delivery failed"
                );
                DispatchOutcome::Failed
            }
        }
    }

    /// Sends a test notification through the primary webhook.
    ///
    /// Unlike [`handle`](Self::handle), errors surface to the caller so an
    /// operator gets immediate feedback.
    pub async fn send_test_notification(&self) -> Result<(), DispatchError> {
        let settings = RelaySettings::load(self.settings.as_ref()).await?;
        let base_url = settings
            .primary_webhook_url
            .clone()
            .ok_or(DispatchError::NoPrimaryWebhook)?;

        let subreddit = self.source.current_subreddit().await?;
        let destination = WebhookDestination {
            base_url,
            thread_id: None,
        };
        let payload = NotificationPayload::with_embeds(RELAY_USERNAME, vec![]).content(format!(
            "Test notification: Modrelay is configured correctly for {}. \
             This test uses the primary webhook; other categories may use \
             dedicated webhooks if configured.",
            format_subreddit(&subreddit.name)
        ));

        self.client.deliver(&destination, &payload).await?;
        Ok(())
    }
}
