//! Notification payload model.
//!
//! Mirrors the messaging provider's webhook body: optional plain content,
//! a sequence of embeds, and a display username. Field ceilings live in
//! [`limits`] and are enforced by the sanitizer before transmission.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Hard length ceilings imposed by the messaging provider.
pub mod limits {
    /// Plain message content.
    pub const CONTENT: usize = 2000;
    /// Embed title.
    pub const TITLE: usize = 256;
    /// Embed description.
    pub const DESCRIPTION: usize = 4096;
    /// Embed field name.
    pub const FIELD_NAME: usize = 256;
    /// Embed field value.
    pub const FIELD_VALUE: usize = 1024;
}

/// Embed accent colors per event kind.
pub mod colors {
    pub const POST: u32 = 0x4f46e5; // Indigo
    pub const COMMENT: u32 = 0x10b981; // Emerald
    pub const MODQUEUE: u32 = 0xf59e0b; // Amber
    pub const APPROVE: u32 = 0x10b981; // Green
    pub const REMOVE: u32 = 0xef4444; // Red
    pub const SPAM: u32 = 0xf59e0b; // Orange
    pub const BAN: u32 = 0xef4444; // Red
    pub const REPORT: u32 = 0xef4444; // Red
    pub const MODMAIL: u32 = 0x3b82f6; // Blue
    pub const INFO: u32 = 0x6b7280; // Gray
    /// Actions taken by the platform itself rather than a moderator.
    pub const PLATFORM_AUTOMATED: u32 = 0xff6b35;
}

/// The JSON body POSTed to a webhook.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct NotificationPayload {
    /// Plain text above the embeds; carries role mentions when configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Rich embeds, delivered in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
    /// Display name for the webhook sender.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Avatar override for the webhook sender.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl NotificationPayload {
    /// Creates a payload with the given embeds and the relay username.
    pub fn with_embeds(username: impl Into<String>, embeds: Vec<Embed>) -> Self {
        Self {
            content: None,
            embeds,
            username: Some(username.into()),
            avatar_url: None,
        }
    }

    /// Sets the plain content above the embeds.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

/// A structured, field-based rich-message unit.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Embed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedThumbnail>,
    /// RFC 3339 timestamp rendered by the provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl Embed {
    /// Starts building an embed.
    pub fn builder() -> EmbedBuilder {
        EmbedBuilder::default()
    }
}

/// A name/value pair inside an embed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// Author line of an embed.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct EmbedAuthor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

/// Footer line of an embed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbedFooter {
    pub text: String,
}

/// Thumbnail image of an embed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbedThumbnail {
    pub url: String,
}

/// Builder for [`Embed`].
#[derive(Debug, Clone, Default)]
pub struct EmbedBuilder {
    embed: Embed,
}

impl EmbedBuilder {
    /// Sets the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.embed.title = Some(title.into());
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.embed.description = Some(description.into());
        self
    }

    /// Sets the click-through URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.embed.url = Some(url.into());
        self
    }

    /// Sets the accent color.
    pub fn color(mut self, color: u32) -> Self {
        self.embed.color = Some(color);
        self
    }

    /// Appends a field.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.embed.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    /// Sets the author line.
    pub fn author(mut self, author: EmbedAuthor) -> Self {
        self.embed.author = Some(author);
        self
    }

    /// Sets the footer text.
    pub fn footer(mut self, text: impl Into<String>) -> Self {
        self.embed.footer = Some(EmbedFooter { text: text.into() });
        self
    }

    /// Sets the thumbnail image.
    pub fn thumbnail(mut self, url: impl Into<String>) -> Self {
        self.embed.thumbnail = Some(EmbedThumbnail { url: url.into() });
        self
    }

    /// Stamps the embed with the given time.
    pub fn timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.embed.timestamp = Some(at.to_rfc3339());
        self
    }

    /// Stamps the embed with the current time.
    pub fn timestamp_now(self) -> Self {
        self.timestamp(Utc::now())
    }

    /// Finishes the embed.
    pub fn build(self) -> Embed {
        self.embed
    }
}
