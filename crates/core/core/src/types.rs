//! Content types fetched from the hosting platform.

use serde::{Deserialize, Serialize};

/// A post as returned by the content-lookup capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Fullname of the post (`t3_` prefixed).
    pub id: String,
    /// Post title.
    pub title: String,
    /// Author username; `None` when the account is deleted.
    pub author_name: Option<String>,
    /// Site-relative permalink, e.g. `/r/rustlang/comments/abc/...`.
    pub permalink: String,
    /// Current score.
    pub score: i64,
}

/// A comment as returned by the content-lookup capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Fullname of the comment (`t1_` prefixed).
    pub id: String,
    /// Fullname of the parent post (`t3_` prefixed).
    pub post_id: String,
    /// Comment body; `None` when deleted.
    pub body: Option<String>,
    /// Author username; `None` when the account is deleted.
    pub author_name: Option<String>,
    /// Site-relative permalink.
    pub permalink: String,
    /// Current score.
    pub score: i64,
}

/// The subreddit the relay is installed on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subreddit {
    /// Fullname of the subreddit (`t5_` prefixed).
    pub id: String,
    /// Display name without the `r/` prefix.
    pub name: String,
}
