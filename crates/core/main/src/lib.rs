//! # Modrelay
//!
//! Modrelay relays moderation events from a subreddit to Discord webhooks,
//! so moderators get near-real-time alerts without watching the modqueue.
//!
//! The hosting platform pushes one typed event per invocation into
//! [`Dispatcher::handle`], which routes the event to the configured
//! webhook for its category, optionally gates new posts and comments on a
//! visibility check, rate-limits per destination, and delivers with
//! bounded retry. Nothing the pipeline does ever raises back into the
//! platform's trigger interface.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use modrelay::{Dispatcher, ModEvent, SubredditRef};
//!
//! let dispatcher = Dispatcher::new(settings_store, reddit_source);
//!
//! let outcome = dispatcher
//!     .handle(ModEvent::PostSubmit {
//!         post_id: "t3_abc123".to_string(),
//!         author: None,
//!         subreddit: SubredditRef::new("t5_xyz", "rustlang"),
//!     })
//!     .await;
//! ```

pub mod dispatch;
pub mod embeds;
pub mod format;
pub mod moderation;
pub mod visibility;

pub use dispatch::{DispatchError, DispatchOutcome, Dispatcher, DropReason};
pub use visibility::{VisibilityConfig, VisibilityGate};

// Re-export the foundation crates
pub use modrelay_core::*;
pub use modrelay_webhooks as webhooks;
pub use modrelay_webhooks::{
    DeliveryClient, NotificationPayload, RateLimit, SlidingWindowLimiter, WebhookDestination,
    WebhookError, WebhookResult,
};

#[cfg(test)]
pub(crate) mod test_support;
