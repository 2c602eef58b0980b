//! Notification categories.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The notification categories a subreddit can monitor.
///
/// Each category has its own optional webhook URL and thread ID in the
/// relay settings, and the monitored-events filter is a subset of this
/// enum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    /// New post submissions.
    Posts,
    /// New comment submissions.
    Comments,
    /// Content filtered into the modqueue by AutoModerator.
    Modqueue,
    /// Moderator log actions.
    Modlog,
    /// Modmail messages.
    Modmail,
    /// User reports on posts and comments.
    Reports,
}

impl EventCategory {
    /// Every category, in settings order.
    pub const ALL: [EventCategory; 6] = [
        EventCategory::Posts,
        EventCategory::Comments,
        EventCategory::Modqueue,
        EventCategory::Modlog,
        EventCategory::Modmail,
        EventCategory::Reports,
    ];

    /// Returns the settings-store value for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Posts => "posts",
            EventCategory::Comments => "comments",
            EventCategory::Modqueue => "modqueue",
            EventCategory::Modlog => "modlog",
            EventCategory::Modmail => "modmail",
            EventCategory::Reports => "reports",
        }
    }
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown category value.
#[derive(Debug, Clone, Error)]
#[error("Unknown event category: {0}")]
pub struct CategoryParseError(pub String);

impl std::str::FromStr for EventCategory {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "posts" => Ok(EventCategory::Posts),
            "comments" => Ok(EventCategory::Comments),
            "modqueue" => Ok(EventCategory::Modqueue),
            "modlog" => Ok(EventCategory::Modlog),
            "modmail" => Ok(EventCategory::Modmail),
            "reports" => Ok(EventCategory::Reports),
            other => Err(CategoryParseError(other.to_string())),
        }
    }
}
