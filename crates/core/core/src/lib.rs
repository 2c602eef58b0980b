//! # Modrelay Core
//!
//! This crate provides the foundational types and traits for the Modrelay
//! notification relay. It defines the settings model read from the hosting
//! platform's configuration store, the content types and lookup trait used
//! to re-fetch posts and comments, and the shared error type.

pub mod error;
pub mod settings;
pub mod traits;
pub mod types;

// Re-export commonly used items at the crate root
pub use error::{RelayError, RelayResult};
pub use settings::{CATEGORY_KEYS, InMemorySettings, RelaySettings, keys};
pub use traits::{ContentSource, SettingsSource};
pub use types::{Comment, Post, Subreddit};

// Re-export event types from the events crate
pub use modrelay_events as events;
pub use modrelay_events::{Actor, EventCategory, ModEvent, Moderator, SubredditRef};
