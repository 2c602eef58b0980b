//! Relay settings model.
//!
//! Settings are read from the platform's per-subreddit configuration store
//! on every dispatch, so moderators can change webhooks without a
//! redeploy. Blank values are treated as unset throughout.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use modrelay_events::EventCategory;

use crate::error::RelayResult;
use crate::traits::SettingsSource;

/// Setting keys shared with the platform settings surface.
pub mod keys {
    /// Primary webhook URL, the fallback for every category.
    pub const PRIMARY_WEBHOOK_URL: &str = "discordWebhookUrl";
    /// Multi-select of monitored categories.
    pub const MONITORED_EVENTS: &str = "monitoredEvents";
    /// Role ID or name to mention in urgent notifications.
    pub const MENTION_ROLE: &str = "discordMentionRole";
    /// Suppress post notifications until the post survives filtering.
    pub const ONLY_NOTIFY_VISIBLE_POSTS: &str = "onlyNotifyVisibleNewPosts";
    /// Suppress comment notifications until the comment survives filtering.
    pub const ONLY_NOTIFY_VISIBLE_COMMENTS: &str = "onlyNotifyVisibleNewComments";
}

/// Per-category setting keys: `(category, webhook URL key, thread ID key)`.
///
/// Routing walks this table instead of matching per category, so adding a
/// category means adding a row here and a variant to `EventCategory`.
pub const CATEGORY_KEYS: [(EventCategory, &str, &str); 6] = [
    (EventCategory::Posts, "postsWebhookUrl", "postsThreadId"),
    (EventCategory::Comments, "commentsWebhookUrl", "commentsThreadId"),
    (EventCategory::Modqueue, "modqueueWebhookUrl", "modqueueThreadId"),
    (EventCategory::Modlog, "modlogWebhookUrl", "modlogThreadId"),
    (EventCategory::Modmail, "modmailWebhookUrl", "modmailThreadId"),
    (EventCategory::Reports, "reportsWebhookUrl", "reportsThreadId"),
];

/// Categories monitored when the multi-select was never saved.
const DEFAULT_MONITORED: [EventCategory; 3] = [
    EventCategory::Posts,
    EventCategory::Modqueue,
    EventCategory::Reports,
];

/// A parsed snapshot of the relay settings.
#[derive(Debug, Clone, Default)]
pub struct RelaySettings {
    /// Primary webhook URL; fallback for categories without their own.
    pub primary_webhook_url: Option<String>,
    /// Category-specific webhook URLs. Blank values never appear here.
    pub webhook_urls: HashMap<EventCategory, String>,
    /// Category-specific thread IDs. Blank values never appear here.
    pub thread_ids: HashMap<EventCategory, String>,
    /// The categories to relay.
    pub monitored: HashSet<EventCategory>,
    /// Gate post notifications on a visibility check.
    pub only_notify_visible_posts: bool,
    /// Gate comment notifications on a visibility check.
    pub only_notify_visible_comments: bool,
    /// Role ID or name to mention in urgent notifications.
    pub mention_role: Option<String>,
}

impl RelaySettings {
    /// Loads a settings snapshot from the platform store.
    ///
    /// Unknown values in the monitored-events selection are skipped rather
    /// than failing the whole load; a stale selection must not silence
    /// every other category.
    pub async fn load(source: &dyn SettingsSource) -> RelayResult<Self> {
        let primary_webhook_url = non_blank(source.get(keys::PRIMARY_WEBHOOK_URL).await?);
        let mention_role = non_blank(source.get(keys::MENTION_ROLE).await?);

        let mut webhook_urls = HashMap::new();
        let mut thread_ids = HashMap::new();
        for (category, url_key, thread_key) in CATEGORY_KEYS {
            if let Some(url) = non_blank(source.get(url_key).await?) {
                webhook_urls.insert(category, url);
            }
            if let Some(thread) = non_blank(source.get(thread_key).await?) {
                thread_ids.insert(category, thread);
            }
        }

        let monitored = match source.get_multi(keys::MONITORED_EVENTS).await? {
            Some(values) => values
                .iter()
                .filter_map(|v| v.parse::<EventCategory>().ok())
                .collect(),
            None => DEFAULT_MONITORED.into_iter().collect(),
        };

        Ok(Self {
            primary_webhook_url,
            webhook_urls,
            thread_ids,
            monitored,
            only_notify_visible_posts: source
                .get_bool(keys::ONLY_NOTIFY_VISIBLE_POSTS)
                .await?
                .unwrap_or(false),
            only_notify_visible_comments: source
                .get_bool(keys::ONLY_NOTIFY_VISIBLE_COMMENTS)
                .await?
                .unwrap_or(false),
            mention_role,
        })
    }

    /// Whether the category is in the monitored set.
    pub fn is_monitored(&self, category: EventCategory) -> bool {
        self.monitored.contains(&category)
    }

    /// The category-specific webhook URL, if configured.
    pub fn webhook_url_for(&self, category: EventCategory) -> Option<&str> {
        self.webhook_urls.get(&category).map(String::as_str)
    }

    /// The category-specific thread ID, if configured.
    pub fn thread_id_for(&self, category: EventCategory) -> Option<&str> {
        self.thread_ids.get(&category).map(String::as_str)
    }
}

/// Normalizes a raw setting: trims whitespace, maps blank to `None`.
fn non_blank(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// In-memory settings store for tests and development.
#[derive(Debug, Clone, Default)]
pub struct InMemorySettings {
    strings: HashMap<String, String>,
    multis: HashMap<String, Vec<String>>,
    bools: HashMap<String, bool>,
}

impl InMemorySettings {
    /// Creates an empty settings store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a string value.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.strings.insert(key.into(), value.into());
        self
    }

    /// Sets a multi-select value.
    pub fn with_multi(
        mut self,
        key: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.multis
            .insert(key.into(), values.into_iter().map(Into::into).collect());
        self
    }

    /// Sets a boolean flag.
    pub fn with_bool(mut self, key: impl Into<String>, value: bool) -> Self {
        self.bools.insert(key.into(), value);
        self
    }
}

#[async_trait]
impl SettingsSource for InMemorySettings {
    async fn get(&self, key: &str) -> RelayResult<Option<String>> {
        Ok(self.strings.get(key).cloned())
    }

    async fn get_multi(&self, key: &str) -> RelayResult<Option<Vec<String>>> {
        Ok(self.multis.get(key).cloned())
    }

    async fn get_bool(&self, key: &str) -> RelayResult<Option<bool>> {
        Ok(self.bools.get(key).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_defaults() {
        let settings = RelaySettings::load(&InMemorySettings::new()).await.unwrap();

        assert!(settings.primary_webhook_url.is_none());
        assert!(settings.webhook_urls.is_empty());
        assert!(settings.is_monitored(EventCategory::Posts));
        assert!(settings.is_monitored(EventCategory::Modqueue));
        assert!(settings.is_monitored(EventCategory::Reports));
        assert!(!settings.is_monitored(EventCategory::Comments));
        assert!(!settings.only_notify_visible_posts);
    }

    #[tokio::test]
    async fn test_blank_values_are_unset() {
        let source = InMemorySettings::new()
            .with(keys::PRIMARY_WEBHOOK_URL, "   ")
            .with("postsWebhookUrl", "")
            .with("postsThreadId", " 123 ");

        let settings = RelaySettings::load(&source).await.unwrap();

        assert!(settings.primary_webhook_url.is_none());
        assert!(settings.webhook_url_for(EventCategory::Posts).is_none());
        assert_eq!(settings.thread_id_for(EventCategory::Posts), Some("123"));
    }

    #[tokio::test]
    async fn test_explicit_empty_selection() {
        let source =
            InMemorySettings::new().with_multi(keys::MONITORED_EVENTS, Vec::<String>::new());

        let settings = RelaySettings::load(&source).await.unwrap();
        assert!(settings.monitored.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_categories_skipped() {
        let source =
            InMemorySettings::new().with_multi(keys::MONITORED_EVENTS, ["posts", "wiki", "modmail"]);

        let settings = RelaySettings::load(&source).await.unwrap();
        assert!(settings.is_monitored(EventCategory::Posts));
        assert!(settings.is_monitored(EventCategory::Modmail));
        assert_eq!(settings.monitored.len(), 2);
    }

    #[tokio::test]
    async fn test_category_table_is_exhaustive() {
        let covered: std::collections::HashSet<_> =
            CATEGORY_KEYS.iter().map(|(c, _, _)| *c).collect();
        for category in EventCategory::ALL {
            assert!(covered.contains(&category));
        }
    }
}
