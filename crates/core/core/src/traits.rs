//! Traits for the platform collaborators the relay depends on.
//!
//! Both collaborators are read-only from the relay's point of view: the
//! settings store is the subreddit configuration surface, and the content
//! source wraps the platform's lookup API. Production implementations live
//! with the host integration; tests use the in-memory ones.

use async_trait::async_trait;

use crate::error::RelayResult;
use crate::types::{Comment, Post, Subreddit};

/// Read-only key-value view over the platform settings store.
#[async_trait]
pub trait SettingsSource: Send + Sync {
    /// Raw string value for a key; `None` when unset.
    async fn get(&self, key: &str) -> RelayResult<Option<String>>;

    /// Multi-select values for a key; `None` when the key was never set,
    /// as opposed to an explicitly empty selection.
    async fn get_multi(&self, key: &str) -> RelayResult<Option<Vec<String>>>;

    /// Boolean flag; `None` when unset.
    async fn get_bool(&self, key: &str) -> RelayResult<Option<bool>>;
}

/// Read-only content lookup against the hosting platform.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetches a post by fullname.
    async fn post_by_id(&self, id: &str) -> RelayResult<Post>;

    /// Fetches a comment by fullname.
    async fn comment_by_id(&self, id: &str) -> RelayResult<Comment>;

    /// The subreddit the relay is installed on.
    async fn current_subreddit(&self) -> RelayResult<Subreddit>;

    /// The newest posts in the subreddit, newest first.
    async fn recent_posts(&self, limit: usize) -> RelayResult<Vec<Post>>;

    /// The newest comments under a post, newest first.
    async fn recent_comments(&self, post_id: &str, limit: usize) -> RelayResult<Vec<Comment>>;
}
