//! Typed trigger payloads.
//!
//! The hosting platform delivers one event per invocation. Each variant
//! carries the provider identifiers needed to re-fetch full content
//! through the content-lookup capability; the relay never receives full
//! post or comment bodies in the trigger itself.

use serde::{Deserialize, Serialize};

use crate::category::EventCategory;

/// The subreddit an event originated from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubredditRef {
    /// Fullname of the subreddit (`t5_` prefixed).
    pub id: String,
    /// Display name without the `r/` prefix.
    pub name: String,
}

impl SubredditRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A user account referenced by an event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Actor {
    /// Fullname of the account (`t2_` prefixed).
    pub id: String,
    /// Username without the `u/` prefix.
    pub name: String,
}

impl Actor {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// The moderator attributed to a log action.
///
/// Absent entirely for actions taken by the platform itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Moderator {
    /// Username without the `u/` prefix.
    pub name: String,
    /// Avatar image URL, when the platform provides one.
    pub icon_url: Option<String>,
    /// Profile URL, when the platform provides one.
    pub profile_url: Option<String>,
}

impl Moderator {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// A moderation event pushed by the hosting platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModEvent {
    /// A new post was submitted.
    PostSubmit {
        post_id: String,
        author: Option<Actor>,
        subreddit: SubredditRef,
    },
    /// A new comment was submitted.
    CommentSubmit {
        comment_id: String,
        post_id: String,
        author: Option<Actor>,
        subreddit: SubredditRef,
    },
    /// A moderator (or the platform itself) acted on content or a user.
    ModAction {
        /// Raw action key from the mod log, e.g. `removelink` or `banuser`.
        action: String,
        moderator: Option<Moderator>,
        target_post_id: Option<String>,
        target_post_title: Option<String>,
        target_user: Option<String>,
        details: Option<String>,
        subreddit: SubredditRef,
    },
    /// A new modmail message arrived.
    ModmailMessage {
        message_author: Option<String>,
        subreddit: SubredditRef,
    },
    /// A post was reported by users.
    PostReport {
        post_id: String,
        reason: Option<String>,
        report_count: Option<u32>,
        subreddit: SubredditRef,
    },
    /// A comment was reported by users.
    CommentReport {
        comment_id: String,
        reason: Option<String>,
        report_count: Option<u32>,
        subreddit: SubredditRef,
    },
    /// AutoModerator filtered a post into the modqueue.
    AutomodFilterPost {
        post_id: String,
        subreddit: SubredditRef,
    },
    /// AutoModerator filtered a comment into the modqueue.
    AutomodFilterComment {
        comment_id: String,
        post_id: String,
        subreddit: SubredditRef,
    },
}

impl ModEvent {
    /// Resolves the notification category this event routes through.
    ///
    /// Both report variants share the `reports` category and both automod
    /// filters share `modqueue`, mirroring the settings surface.
    pub fn category(&self) -> EventCategory {
        match self {
            ModEvent::PostSubmit { .. } => EventCategory::Posts,
            ModEvent::CommentSubmit { .. } => EventCategory::Comments,
            ModEvent::ModAction { .. } => EventCategory::Modlog,
            ModEvent::ModmailMessage { .. } => EventCategory::Modmail,
            ModEvent::PostReport { .. } | ModEvent::CommentReport { .. } => EventCategory::Reports,
            ModEvent::AutomodFilterPost { .. } | ModEvent::AutomodFilterComment { .. } => {
                EventCategory::Modqueue
            }
        }
    }

    /// The subreddit the event originated from.
    pub fn subreddit(&self) -> &SubredditRef {
        match self {
            ModEvent::PostSubmit { subreddit, .. }
            | ModEvent::CommentSubmit { subreddit, .. }
            | ModEvent::ModAction { subreddit, .. }
            | ModEvent::ModmailMessage { subreddit, .. }
            | ModEvent::PostReport { subreddit, .. }
            | ModEvent::CommentReport { subreddit, .. }
            | ModEvent::AutomodFilterPost { subreddit, .. }
            | ModEvent::AutomodFilterComment { subreddit, .. } => subreddit,
        }
    }

    /// Short description used in log lines, e.g. `post_submit(t3_abc)`.
    pub fn describe(&self) -> String {
        match self {
            ModEvent::PostSubmit { post_id, .. } => format!("post_submit({post_id})"),
            ModEvent::CommentSubmit { comment_id, .. } => {
                format!("comment_submit({comment_id})")
            }
            ModEvent::ModAction { action, .. } => format!("mod_action({action})"),
            ModEvent::ModmailMessage { .. } => "modmail_message".to_string(),
            ModEvent::PostReport { post_id, .. } => format!("post_report({post_id})"),
            ModEvent::CommentReport { comment_id, .. } => {
                format!("comment_report({comment_id})")
            }
            ModEvent::AutomodFilterPost { post_id, .. } => {
                format!("automod_filter_post({post_id})")
            }
            ModEvent::AutomodFilterComment { comment_id, .. } => {
                format!("automod_filter_comment({comment_id})")
            }
        }
    }
}
