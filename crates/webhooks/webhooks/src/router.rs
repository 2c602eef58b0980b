//! Destination resolution.
//!
//! Pure configuration lookup: no I/O, no side effects. A `None` result
//! means delivery is disabled for the category, not an error.

use modrelay_core::RelaySettings;
use modrelay_events::EventCategory;

/// A resolved webhook destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookDestination {
    /// The configured webhook URL, without thread targeting.
    pub base_url: String,
    /// Optional thread to post into.
    pub thread_id: Option<String>,
}

impl WebhookDestination {
    /// The full URL to POST to, with `thread_id` appended exactly once.
    pub fn url(&self) -> String {
        match &self.thread_id {
            Some(id) => {
                let separator = if self.base_url.contains('?') { '&' } else { '?' };
                format!("{}{}thread_id={}", self.base_url, separator, id)
            }
            None => self.base_url.clone(),
        }
    }

    /// Key identifying this destination for rate limiting.
    ///
    /// Threads share their parent webhook's limit, so the key is the base
    /// URL rather than the full URL.
    pub fn rate_key(&self) -> &str {
        &self.base_url
    }
}

/// Resolves the destination for a category.
///
/// The category-specific URL wins; the primary URL is the fallback. With
/// neither configured the category is simply not delivered.
pub fn resolve(settings: &RelaySettings, category: EventCategory) -> Option<WebhookDestination> {
    let base_url = settings
        .webhook_url_for(category)
        .or(settings.primary_webhook_url.as_deref())?;

    Some(WebhookDestination {
        base_url: base_url.to_string(),
        thread_id: settings.thread_id_for(category).map(str::to_string),
    })
}
