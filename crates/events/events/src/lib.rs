//! # Modrelay Events
//!
//! Event model for Modrelay providing:
//! - The six notification categories that drive webhook routing
//! - Typed payloads for the moderation triggers the platform delivers
//! - Category resolution for every trigger variant
//!
//! ## Example
//!
//! ```rust,ignore
//! use modrelay_events::{EventCategory, ModEvent, SubredditRef};
//!
//! let event = ModEvent::PostSubmit {
//!     post_id: "t3_abc123".to_string(),
//!     author: None,
//!     subreddit: SubredditRef::new("t5_xyz", "rustlang"),
//! };
//! assert_eq!(event.category(), EventCategory::Posts);
//! ```

mod category;
mod event;

pub use category::{CategoryParseError, EventCategory};
pub use event::{Actor, ModEvent, Moderator, SubredditRef};
