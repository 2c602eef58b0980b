//! # Modrelay Webhooks
//!
//! Webhook delivery for Modrelay providing:
//! - Destination resolution per event category, with thread targeting
//! - Message payload model with provider length ceilings
//! - Markdown and mention sanitization
//! - Sliding-window rate limiting per destination
//! - Delivery with bounded retry and linear backoff
//!
//! ## Example
//!
//! ```rust,ignore
//! use modrelay_webhooks::{DeliveryClient, NotificationPayload, router};
//!
//! let destination = router::resolve(&settings, EventCategory::Posts)
//!     .expect("delivery disabled for this category");
//!
//! let client = DeliveryClient::new();
//! client.deliver(&destination, &payload).await?;
//! ```

mod delivery;
mod error;
mod message;
mod rate_limiter;
mod retry;
pub mod router;
pub mod sanitize;

pub use delivery::{DeliveryClient, TransportResponse, WebhookTransport, redact_url};
#[cfg(feature = "http-client")]
pub use delivery::HttpTransport;
pub use error::{WebhookError, WebhookResult};
pub use message::{
    Embed, EmbedAuthor, EmbedBuilder, EmbedField, EmbedFooter, EmbedThumbnail,
    NotificationPayload, colors, limits,
};
pub use rate_limiter::{RateLimit, SlidingWindowLimiter};
pub use retry::{LinearBackoff, NoRetry, RetryStrategy};
pub use router::WebhookDestination;
