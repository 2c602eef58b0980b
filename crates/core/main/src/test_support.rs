//! In-memory content source for tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use modrelay_core::{Comment, ContentSource, Post, RelayError, RelayResult, Subreddit};

/// Scriptable `ContentSource` backed by in-memory maps.
#[derive(Default)]
pub(crate) struct MockSource {
    posts: Mutex<HashMap<String, Post>>,
    comments: Mutex<HashMap<String, Comment>>,
    recent_posts: Mutex<Vec<Post>>,
    recent_comments: Mutex<Vec<Comment>>,
    fail_listings: AtomicBool,
    lookups: AtomicUsize,
    listing_calls: AtomicUsize,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a post for `post_by_id`.
    pub fn with_post(self, post: Post) -> Self {
        self.posts.lock().unwrap().insert(post.id.clone(), post);
        self
    }

    /// Registers a comment for `comment_by_id`.
    pub fn with_comment(self, comment: Comment) -> Self {
        self.comments
            .lock()
            .unwrap()
            .insert(comment.id.clone(), comment);
        self
    }

    /// Appends a post to the recent-posts listing.
    pub fn with_recent_post(self, post: Post) -> Self {
        self.recent_posts.lock().unwrap().push(post);
        self
    }

    /// Appends a comment to the recent-comments listing.
    pub fn with_recent_comment(self, comment: Comment) -> Self {
        self.recent_comments.lock().unwrap().push(comment);
        self
    }

    /// Makes every listing call fail.
    pub fn failing_listings(self) -> Self {
        self.fail_listings.store(true, Ordering::SeqCst);
        self
    }

    /// Number of by-id and subreddit lookups performed.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Number of recent-listing queries performed.
    pub fn listing_count(&self) -> usize {
        self.listing_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentSource for MockSource {
    async fn post_by_id(&self, id: &str) -> RelayResult<Post> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.posts
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| RelayError::not_found("post", id))
    }

    async fn comment_by_id(&self, id: &str) -> RelayResult<Comment> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.comments
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| RelayError::not_found("comment", id))
    }

    async fn current_subreddit(&self) -> RelayResult<Subreddit> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(Subreddit {
            id: "t5_abc".to_string(),
            name: "rustlang".to_string(),
        })
    }

    async fn recent_posts(&self, limit: usize) -> RelayResult<Vec<Post>> {
        self.listing_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_listings.load(Ordering::SeqCst) {
            return Err(RelayError::lookup("listing unavailable"));
        }
        Ok(self
            .recent_posts
            .lock()
            .unwrap()
            .iter()
            .take(limit)
            .cloned()
            .collect())
    }

    async fn recent_comments(&self, post_id: &str, limit: usize) -> RelayResult<Vec<Comment>> {
        self.listing_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_listings.load(Ordering::SeqCst) {
            return Err(RelayError::lookup("listing unavailable"));
        }
        Ok(self
            .recent_comments
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.post_id == post_id)
            .take(limit)
            .cloned()
            .collect())
    }
}

/// Builds a post with defaults suitable for listings.
pub(crate) fn post(id: &str) -> Post {
    Post {
        id: id.to_string(),
        title: format!("Post {id}"),
        author_name: Some("alice".to_string()),
        permalink: format!("/r/rustlang/comments/{id}/x"),
        score: 1,
    }
}

/// Builds a comment with defaults suitable for listings.
pub(crate) fn comment(id: &str, post_id: &str) -> Comment {
    Comment {
        id: id.to_string(),
        post_id: post_id.to_string(),
        body: Some(format!("Comment {id}")),
        author_name: Some("bob".to_string()),
        permalink: format!("/r/rustlang/comments/{post_id}/x/{id}"),
        score: 1,
    }
}
