//! Basic example wiring the dispatcher with in-memory collaborators.
//!
//! Run with: DISCORD_WEBHOOK_URL=https://discord.com/api/webhooks/... \
//!     cargo run --example relay_event

use std::sync::Arc;

use async_trait::async_trait;
use modrelay::{
    Comment, ContentSource, Dispatcher, InMemorySettings, ModEvent, Post, RelayError,
    RelayResult, Subreddit, SubredditRef,
};

/// Canned content source standing in for the platform API.
struct DemoSource;

#[async_trait]
impl ContentSource for DemoSource {
    async fn post_by_id(&self, id: &str) -> RelayResult<Post> {
        Ok(Post {
            id: id.to_string(),
            title: "Show r/rustlang: a moderation notification relay".to_string(),
            author_name: Some("alice".to_string()),
            permalink: format!("/r/rustlang/comments/{}/show", id.trim_start_matches("t3_")),
            score: 42,
        })
    }

    async fn comment_by_id(&self, id: &str) -> RelayResult<Comment> {
        Err(RelayError::not_found("comment", id))
    }

    async fn current_subreddit(&self) -> RelayResult<Subreddit> {
        Ok(Subreddit {
            id: "t5_demo".to_string(),
            name: "rustlang".to_string(),
        })
    }

    async fn recent_posts(&self, _limit: usize) -> RelayResult<Vec<Post>> {
        Ok(vec![])
    }

    async fn recent_comments(&self, _post_id: &str, _limit: usize) -> RelayResult<Vec<Comment>> {
        Ok(vec![])
    }
}

#[tokio::main]
async fn main() {
    let webhook_url = std::env::var("DISCORD_WEBHOOK_URL")
        .unwrap_or_else(|_| "https://discord.com/api/webhooks/0/placeholder".to_string());

    let settings = InMemorySettings::new()
        .with("discordWebhookUrl", webhook_url)
        .with_multi("monitoredEvents", ["posts", "reports"]);

    let dispatcher = Dispatcher::new(Arc::new(settings), Arc::new(DemoSource));

    // Monitored category: resolves the primary webhook and delivers
    let outcome = dispatcher
        .handle(ModEvent::PostSubmit {
            post_id: "t3_abc123".to_string(),
            author: None,
            subreddit: SubredditRef::new("t5_demo", "rustlang"),
        })
        .await;
    println!("post_submit outcome: {outcome:?}");

    // Unmonitored category: dropped before any network I/O
    let outcome = dispatcher
        .handle(ModEvent::ModmailMessage {
            message_author: Some("writer".to_string()),
            subreddit: SubredditRef::new("t5_demo", "rustlang"),
        })
        .await;
    println!("modmail outcome: {outcome:?}");
}
