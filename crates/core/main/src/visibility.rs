//! Visibility gating for new posts and comments.
//!
//! The platform fires submission events before automated filtering
//! finishes, so a notification sent immediately can point at content that
//! was already removed. When the corresponding setting is enabled, the
//! gate waits a fixed delay for the platform's indexing to settle, then
//! checks whether the content still appears in a bounded recent listing.
//!
//! The delay-then-poll shape is a deliberate trade-off: every gated
//! notification arrives several seconds late, in exchange for not alerting
//! on content that never became visible.

use std::sync::Arc;
use std::time::Duration;

use modrelay_core::{ContentSource, RelaySettings};

/// Timing and listing bounds for visibility checks.
#[derive(Debug, Clone)]
pub struct VisibilityConfig {
    /// Settle time before checking a post.
    pub post_delay: Duration,
    /// Settle time before checking a comment.
    pub comment_delay: Duration,
    /// How many recent posts to scan.
    pub post_listing_limit: usize,
    /// How many recent comments under the parent post to scan.
    pub comment_listing_limit: usize,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            post_delay: Duration::from_millis(10_000),
            comment_delay: Duration::from_millis(3_000),
            post_listing_limit: 25,
            comment_listing_limit: 50,
        }
    }
}

/// Decides whether new content survived automated filtering.
pub struct VisibilityGate<S> {
    source: Arc<S>,
    config: VisibilityConfig,
}

impl<S: ContentSource> VisibilityGate<S> {
    /// Creates a gate with production delays and limits.
    pub fn new(source: Arc<S>) -> Self {
        Self::with_config(source, VisibilityConfig::default())
    }

    /// Creates a gate with explicit timing, for compressed-time tests.
    pub fn with_config(source: Arc<S>, config: VisibilityConfig) -> Self {
        Self { source, config }
    }

    /// Whether a new post should be notified.
    ///
    /// Trivially true when the post visibility setting is off. A failed
    /// listing lookup also answers true: over-notifying beats silently
    /// dropping legitimate alerts when the check itself is unreliable.
    pub async fn should_notify_post(&self, post_id: &str, settings: &RelaySettings) -> bool {
        if !settings.only_notify_visible_posts {
            return true;
        }

        tokio::time::sleep(self.config.post_delay).await;

        match self.source.recent_posts(self.config.post_listing_limit).await {
            Ok(posts) => posts.iter().any(|post| post.id == post_id),
            Err(e) => {
                tracing::warn!(post_id, error = %e, "Visibility check failed, assuming visible");
                true
            }
        }
    }

    /// Whether a new comment should be notified.
    pub async fn should_notify_comment(
        &self,
        comment_id: &str,
        post_id: &str,
        settings: &RelaySettings,
    ) -> bool {
        if !settings.only_notify_visible_comments {
            return true;
        }

        tokio::time::sleep(self.config.comment_delay).await;

        match self
            .source
            .recent_comments(post_id, self.config.comment_listing_limit)
            .await
        {
            Ok(comments) => comments.iter().any(|comment| comment.id == comment_id),
            Err(e) => {
                tracing::warn!(
                    comment_id,
                    post_id,
                    error = %e,
                    "Visibility check failed, assuming visible"
                );
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockSource, comment, post};
    use modrelay_core::{InMemorySettings, SettingsSource};

    fn instant_config() -> VisibilityConfig {
        VisibilityConfig {
            post_delay: Duration::ZERO,
            comment_delay: Duration::ZERO,
            ..VisibilityConfig::default()
        }
    }

    async fn gated_settings() -> RelaySettings {
        let source = InMemorySettings::new()
            .with_bool("onlyNotifyVisibleNewPosts", true)
            .with_bool("onlyNotifyVisibleNewComments", true);
        RelaySettings::load(&source as &dyn SettingsSource)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_disabled_gate_skips_lookup() {
        let source = Arc::new(MockSource::new());
        let gate = VisibilityGate::with_config(source.clone(), instant_config());
        let settings = RelaySettings::load(&InMemorySettings::new() as &dyn SettingsSource)
            .await
            .unwrap();

        assert!(gate.should_notify_post("t3_1", &settings).await);
        assert!(gate.should_notify_comment("t1_1", "t3_1", &settings).await);
        assert_eq!(source.listing_count(), 0);
    }

    #[tokio::test]
    async fn test_visible_post_passes() {
        let source = Arc::new(MockSource::new().with_recent_post(post("t3_1")));
        let gate = VisibilityGate::with_config(source, instant_config());

        assert!(gate.should_notify_post("t3_1", &gated_settings().await).await);
    }

    #[tokio::test]
    async fn test_filtered_post_is_suppressed() {
        let source = Arc::new(MockSource::new().with_recent_post(post("t3_other")));
        let gate = VisibilityGate::with_config(source, instant_config());

        assert!(!gate.should_notify_post("t3_1", &gated_settings().await).await);
    }

    #[tokio::test]
    async fn test_lookup_failure_defaults_to_visible() {
        let source = Arc::new(MockSource::new().failing_listings());
        let gate = VisibilityGate::with_config(source, instant_config());
        let settings = gated_settings().await;

        assert!(gate.should_notify_post("t3_1", &settings).await);
        assert!(gate.should_notify_comment("t1_1", "t3_1", &settings).await);
    }

    #[tokio::test]
    async fn test_comment_checked_against_parent_listing() {
        let source = Arc::new(
            MockSource::new()
                .with_recent_comment(comment("t1_1", "t3_1"))
                .with_recent_comment(comment("t1_2", "t3_other")),
        );
        let gate = VisibilityGate::with_config(source, instant_config());
        let settings = gated_settings().await;

        assert!(gate.should_notify_comment("t1_1", "t3_1", &settings).await);
        // Same comment id under a different parent is not visible
        assert!(!gate.should_notify_comment("t1_2", "t3_1", &settings).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gate_waits_for_indexing() {
        let source = Arc::new(MockSource::new().with_recent_post(post("t3_1")));
        let gate = VisibilityGate::new(source);
        let settings = gated_settings().await;

        let started = tokio::time::Instant::now();
        gate.should_notify_post("t3_1", &settings).await;
        assert_eq!(started.elapsed(), Duration::from_millis(10_000));

        let started = tokio::time::Instant::now();
        gate.should_notify_comment("t1_1", "t3_1", &settings).await;
        assert_eq!(started.elapsed(), Duration::from_millis(3_000));
    }
}
