//! Webhook error types.

use thiserror::Error;

/// Result type for webhook operations.
pub type WebhookResult<T> = Result<T, WebhookError>;

/// Error type for webhook operations.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The destination is not a webhook URL for the messaging provider.
    ///
    /// Fatal for the dispatch; no network I/O was attempted.
    #[error("Invalid webhook destination: {0}")]
    InvalidDestination(String),

    /// Every delivery attempt failed.
    #[error("Delivery failed after {attempts} attempts: {last_error}")]
    DeliveryExhausted { attempts: u32, last_error: String },

    /// Transport-level HTTP error for a single attempt.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Request timeout.
    #[error("Request timeout")]
    Timeout,
}

#[cfg(feature = "http-client")]
impl From<reqwest::Error> for WebhookError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            WebhookError::Timeout
        } else {
            WebhookError::Http(err.to_string())
        }
    }
}
