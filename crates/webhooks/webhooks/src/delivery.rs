//! Webhook delivery client.

use async_trait::async_trait;
use url::Url;

use crate::error::{WebhookError, WebhookResult};
use crate::message::NotificationPayload;
use crate::retry::RetryStrategy;
use crate::router::WebhookDestination;
use crate::sanitize::sanitize_payload;

/// Host the messaging provider serves webhooks from.
pub const WEBHOOK_HOST: &str = "discord.com";

/// Path prefix of the provider's webhook endpoints.
pub const WEBHOOK_PATH_PREFIX: &str = "/api/webhooks/";

/// Response observed for a single transmission attempt.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body, used in failure messages.
    pub body: String,
}

impl TransportResponse {
    /// Whether the provider accepted the payload.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for the HTTP layer a delivery goes through.
///
/// `Ok` carries any HTTP response, success or not; `Err` is reserved for
/// transport-level failures where no response was observed.
#[async_trait]
pub trait WebhookTransport: Send + Sync {
    /// POSTs the payload as JSON with `Content-Type: application/json`.
    async fn post_json(
        &self,
        url: &str,
        payload: &NotificationPayload,
    ) -> WebhookResult<TransportResponse>;
}

/// Reqwest-backed transport.
#[cfg(feature = "http-client")]
pub struct HttpTransport {
    client: reqwest::Client,
    timeout: std::time::Duration,
}

#[cfg(feature = "http-client")]
impl HttpTransport {
    /// Creates a transport with a 30 second request timeout.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout: std::time::Duration::from_secs(30),
        }
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(feature = "http-client")]
impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "http-client")]
#[async_trait]
impl WebhookTransport for HttpTransport {
    async fn post_json(
        &self,
        url: &str,
        payload: &NotificationPayload,
    ) -> WebhookResult<TransportResponse> {
        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .timeout(self.timeout)
            .json(payload)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        Ok(TransportResponse { status, body })
    }
}

/// Webhook delivery client with bounded retry.
pub struct DeliveryClient<T: WebhookTransport, R: RetryStrategy> {
    transport: T,
    retry: R,
}

#[cfg(feature = "http-client")]
impl DeliveryClient<HttpTransport, crate::retry::LinearBackoff> {
    /// Creates a client with the HTTP transport and default retry
    /// (3 attempts, 1 s linear backoff).
    pub fn new() -> Self {
        Self::with_transport_and_retry(HttpTransport::new(), crate::retry::LinearBackoff::new())
    }
}

#[cfg(feature = "http-client")]
impl Default for DeliveryClient<HttpTransport, crate::retry::LinearBackoff> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: WebhookTransport, R: RetryStrategy> DeliveryClient<T, R> {
    /// Creates a client from explicit transport and retry strategy.
    pub fn with_transport_and_retry(transport: T, retry: R) -> Self {
        Self { transport, retry }
    }

    /// Delivers a payload to a destination.
    ///
    /// The destination is validated before any network I/O and the payload
    /// is sanitized before transmission. A non-success status or transport
    /// error counts as a failed attempt; attempts are retried per the
    /// configured strategy until the budget is spent.
    ///
    /// At most one success is ever reported to the caller. On the wire the
    /// provider may observe more than one attempt when a failure was a
    /// false negative, so deliveries are at-least-once; callers must not
    /// treat an error as proof the message never arrived.
    pub async fn deliver(
        &self,
        destination: &WebhookDestination,
        payload: &NotificationPayload,
    ) -> WebhookResult<()> {
        validate_destination(&destination.base_url)?;

        let payload = sanitize_payload(payload.clone());
        let url = destination.url();
        let mut attempts = 0u32;

        loop {
            attempts += 1;

            let error = match self.transport.post_json(&url, &payload).await {
                Ok(response) if response.is_success() => {
                    tracing::debug!(attempts, "Webhook delivered");
                    return Ok(());
                }
                Ok(response) => format!("HTTP {}: {}", response.status, response.body),
                Err(e) => e.to_string(),
            };

            match self.retry.next_delay(attempts) {
                Some(delay) => {
                    tracing::warn!(
                        attempt = attempts,
                        max_attempts = self.retry.max_attempts(),
                        error = %error,
                        "Webhook attempt failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                None => {
                    return Err(WebhookError::DeliveryExhausted {
                        attempts,
                        last_error: error,
                    });
                }
            }
        }
    }

    /// Gets the retry strategy.
    pub fn retry(&self) -> &R {
        &self.retry
    }
}

/// Checks that a URL points at the messaging provider's webhook surface.
fn validate_destination(base_url: &str) -> WebhookResult<()> {
    let parsed = Url::parse(base_url)
        .map_err(|e| WebhookError::InvalidDestination(format!("not a URL: {e}")))?;

    if parsed.scheme() != "https"
        || parsed.host_str() != Some(WEBHOOK_HOST)
        || !parsed.path().starts_with(WEBHOOK_PATH_PREFIX)
    {
        return Err(WebhookError::InvalidDestination(format!(
            "{} is not a provider webhook URL",
            redact_url(base_url)
        )));
    }

    Ok(())
}

/// Truncates a URL for log output so webhook tokens never land in logs.
pub fn redact_url(url: &str) -> String {
    const KEEP: usize = 50;
    if url.chars().count() <= KEEP {
        return url.to_string();
    }
    let head: String = url.chars().take(KEEP).collect();
    format!("{head}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Embed;
    use crate::retry::{LinearBackoff, NoRetry};
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    const HOOK: &str = "https://discord.com/api/webhooks/1/abcdef";

    /// Transport that replays scripted outcomes and records requests.
    #[derive(Clone, Default)]
    struct ScriptedTransport {
        outcomes: Arc<Mutex<VecDeque<WebhookResult<TransportResponse>>>>,
        requests: Arc<Mutex<Vec<(String, NotificationPayload)>>>,
    }

    impl ScriptedTransport {
        fn scripted(outcomes: Vec<WebhookResult<TransportResponse>>) -> Self {
            Self {
                outcomes: Arc::new(Mutex::new(outcomes.into())),
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn status(status: u16) -> WebhookResult<TransportResponse> {
            Ok(TransportResponse {
                status,
                body: String::new(),
            })
        }

        fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl WebhookTransport for ScriptedTransport {
        async fn post_json(
            &self,
            url: &str,
            payload: &NotificationPayload,
        ) -> WebhookResult<TransportResponse> {
            self.requests
                .lock()
                .unwrap()
                .push((url.to_string(), payload.clone()));
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Self::status(204))
        }
    }

    fn destination() -> WebhookDestination {
        WebhookDestination {
            base_url: HOOK.to_string(),
            thread_id: None,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_after_two_failures() {
        let transport = ScriptedTransport::scripted(vec![
            ScriptedTransport::status(500),
            ScriptedTransport::status(429),
            ScriptedTransport::status(204),
        ]);
        let client =
            DeliveryClient::with_transport_and_retry(transport.clone(), LinearBackoff::new());

        let started = tokio::time::Instant::now();
        client
            .deliver(&destination(), &NotificationPayload::default())
            .await
            .unwrap();

        assert_eq!(transport.request_count(), 3);
        // Inter-attempt delays: base, then 2 * base
        assert_eq!(started.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_carries_last_error() {
        let transport = ScriptedTransport::scripted(vec![
            ScriptedTransport::status(500),
            ScriptedTransport::status(502),
            ScriptedTransport::status(503),
        ]);
        let client =
            DeliveryClient::with_transport_and_retry(transport.clone(), LinearBackoff::new());

        let err = client
            .deliver(&destination(), &NotificationPayload::default())
            .await
            .unwrap_err();

        assert_eq!(transport.request_count(), 3);
        match err {
            WebhookError::DeliveryExhausted {
                attempts,
                last_error,
            } => {
                assert_eq!(attempts, 3);
                assert!(last_error.contains("503"));
            }
            other => panic!("expected DeliveryExhausted, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_destination_skips_network() {
        let transport = ScriptedTransport::default();
        let client = DeliveryClient::with_transport_and_retry(transport.clone(), NoRetry);

        for bad in [
            "https://example.com/api/webhooks/1/abc",
            "https://discord.com/other/path",
            "http://discord.com/api/webhooks/1/abc",
            "not a url",
        ] {
            let destination = WebhookDestination {
                base_url: bad.to_string(),
                thread_id: None,
            };
            let err = client
                .deliver(&destination, &NotificationPayload::default())
                .await
                .unwrap_err();
            assert!(matches!(err, WebhookError::InvalidDestination(_)));
        }

        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_payload_sanitized_before_transmission() {
        let transport = ScriptedTransport::default();
        let client = DeliveryClient::with_transport_and_retry(transport.clone(), NoRetry);

        let payload = NotificationPayload {
            content: Some("@everyone look".into()),
            embeds: vec![Embed {
                title: Some("x".repeat(500)),
                ..Embed::default()
            }],
            username: Some("Modrelay".into()),
            avatar_url: None,
        };

        client.deliver(&destination(), &payload).await.unwrap();

        let requests = transport.requests.lock().unwrap();
        let (url, sent) = &requests[0];
        assert_eq!(url, HOOK);
        assert!(!sent.content.as_ref().unwrap().contains("@everyone"));
        assert_eq!(sent.embeds[0].title.as_ref().unwrap().chars().count(), 256);
    }

    #[tokio::test]
    async fn test_transport_error_is_retried() {
        let transport = ScriptedTransport::scripted(vec![
            Err(WebhookError::Timeout),
            ScriptedTransport::status(200),
        ]);
        let client = DeliveryClient::with_transport_and_retry(
            transport.clone(),
            LinearBackoff::new().base(Duration::ZERO),
        );

        client
            .deliver(&destination(), &NotificationPayload::default())
            .await
            .unwrap();

        assert_eq!(transport.request_count(), 2);
    }

    #[test]
    fn test_redact_url() {
        let long = format!("{HOOK}/{}", "t".repeat(80));
        let redacted = redact_url(&long);
        assert!(redacted.ends_with("..."));
        assert_eq!(redacted.chars().count(), 53);
        assert_eq!(redact_url(HOOK), HOOK);
    }

    #[tokio::test]
    async fn test_thread_id_reaches_the_wire() {
        let transport = ScriptedTransport::default();
        let client = DeliveryClient::with_transport_and_retry(transport.clone(), NoRetry);

        let destination = WebhookDestination {
            base_url: HOOK.to_string(),
            thread_id: Some("42".to_string()),
        };
        client
            .deliver(&destination, &NotificationPayload::default())
            .await
            .unwrap();

        let requests = transport.requests.lock().unwrap();
        assert_eq!(requests[0].0, format!("{HOOK}?thread_id=42"));
    }
}
