//! Notification rendering.
//!
//! One function per event kind, each a stateless transform over content
//! fetched from the platform. The dispatcher performs the fetches; nothing
//! here talks to the network. Sanitization and length ceilings are applied
//! later by the delivery client.

use modrelay_core::{Comment, ContentSource, Post, RelayResult, RelaySettings};
use modrelay_events::{ModEvent, Moderator};
use modrelay_webhooks::{Embed, EmbedAuthor, NotificationPayload, colors};

use crate::format::{format_score, format_subreddit, format_username, preview};
use crate::moderation::{action_display, is_platform_automated, mention_prefix};

/// Display name used for every webhook message.
pub const RELAY_USERNAME: &str = "Modrelay";

/// Renders the notification payload for an event, fetching the referenced
/// content as needed.
pub async fn render<S>(
    event: &ModEvent,
    source: &S,
    settings: &RelaySettings,
) -> RelayResult<NotificationPayload>
where
    S: ContentSource + ?Sized,
{
    let mention = settings.mention_role.as_deref();
    let subreddit = format_subreddit(&event.subreddit().name);

    let payload = match event {
        ModEvent::PostSubmit { post_id, .. } => {
            let post = source.post_by_id(post_id).await?;
            plain(new_post_embed(&post, &subreddit))
        }
        ModEvent::CommentSubmit { comment_id, .. } => {
            let comment = source.comment_by_id(comment_id).await?;
            plain(new_comment_embed(&comment, &subreddit))
        }
        ModEvent::ModAction {
            action,
            moderator,
            target_post_id,
            target_post_title,
            target_user,
            details,
            subreddit: sub,
        } => plain(mod_action_embed(
            action,
            moderator.as_ref(),
            target_post_id.as_deref(),
            target_post_title.as_deref(),
            target_user.as_deref(),
            details.as_deref(),
            &sub.name,
        )),
        ModEvent::ModmailMessage { message_author, .. } => with_mention(
            modmail_embed(message_author.as_deref(), &subreddit),
            mention,
            "New modmail message",
        ),
        ModEvent::PostReport {
            post_id,
            reason,
            report_count,
            ..
        } => {
            let post = source.post_by_id(post_id).await?;
            with_mention(
                post_report_embed(&post, reason.as_deref(), *report_count, &subreddit),
                mention,
                "Post reported and needs moderation",
            )
        }
        ModEvent::CommentReport {
            comment_id,
            reason,
            report_count,
            ..
        } => {
            let comment = source.comment_by_id(comment_id).await?;
            with_mention(
                comment_report_embed(&comment, reason.as_deref(), *report_count, &subreddit),
                mention,
                "Comment reported and needs moderation",
            )
        }
        ModEvent::AutomodFilterPost { post_id, .. } => {
            let post = source.post_by_id(post_id).await?;
            with_mention(
                automod_post_embed(&post, &subreddit),
                mention,
                "Post filtered by AutoModerator and needs review",
            )
        }
        ModEvent::AutomodFilterComment { comment_id, .. } => {
            let comment = source.comment_by_id(comment_id).await?;
            with_mention(
                automod_comment_embed(&comment, &subreddit),
                mention,
                "Comment filtered by AutoModerator and needs review",
            )
        }
    };

    Ok(payload)
}

fn plain(embed: Embed) -> NotificationPayload {
    NotificationPayload::with_embeds(RELAY_USERNAME, vec![embed])
}

fn with_mention(embed: Embed, mention_role: Option<&str>, text: &str) -> NotificationPayload {
    let payload = plain(embed);
    match mention_prefix(mention_role, text) {
        Some(content) => payload.content(content),
        None => payload,
    }
}

fn permalink_url(permalink: &str) -> String {
    format!("https://reddit.com{permalink}")
}

fn new_post_embed(post: &Post, subreddit: &str) -> Embed {
    Embed::builder()
        .title("\u{1F4DD} New Post")
        .description(post.title.as_str())
        .url(permalink_url(&post.permalink))
        .color(colors::POST)
        .field("Author", format_username(post.author_name.as_deref()), true)
        .field("Subreddit", subreddit, true)
        .field("Score", format_score(post.score), true)
        .timestamp_now()
        .footer(RELAY_USERNAME)
        .build()
}

fn new_comment_embed(comment: &Comment, subreddit: &str) -> Embed {
    Embed::builder()
        .title("\u{1F4AC} New Comment")
        .description(comment_body_preview(comment, 300))
        .url(permalink_url(&comment.permalink))
        .color(colors::COMMENT)
        .field(
            "Author",
            format_username(comment.author_name.as_deref()),
            true,
        )
        .field("Subreddit", subreddit, true)
        .field("Score", format_score(comment.score), true)
        .timestamp_now()
        .footer(RELAY_USERNAME)
        .build()
}

#[allow(clippy::too_many_arguments)]
fn mod_action_embed(
    action: &str,
    moderator: Option<&Moderator>,
    target_post_id: Option<&str>,
    target_post_title: Option<&str>,
    target_user: Option<&str>,
    details: Option<&str>,
    subreddit_name: &str,
) -> Embed {
    let display = action_display(action);
    let automated = is_platform_automated(moderator);

    let (kind, description, color) = if automated {
        (
            "Reddit Automated Action",
            "Action performed automatically by Reddit's systems",
            colors::PLATFORM_AUTOMATED,
        )
    } else {
        ("Moderator Action", "Action performed by moderator", display.color)
    };

    let mut builder = Embed::builder()
        .title(format!("{} {}: {}", display.emoji, kind, display.name))
        .description(description)
        .url(format!("https://reddit.com/mod/{subreddit_name}/log"))
        .color(color)
        .timestamp_now()
        .footer(format_subreddit(subreddit_name));

    if let (Some(id), Some(title)) = (target_post_id, target_post_title) {
        let link = format!(
            "[{}](https://reddit.com/comments/{})",
            preview(title, 50),
            id.trim_start_matches("t3_")
        );
        builder = builder.field("Target Post", link, false);
    }
    if let Some(user) = target_user {
        builder = builder.field("Target User", format_username(Some(user)), true);
    }
    if let Some(details) = details {
        builder = builder.field("Details", details, false);
    }
    if let Some(moderator) = moderator {
        builder = builder.author(EmbedAuthor {
            name: moderator.name.clone(),
            url: moderator.profile_url.clone().or_else(|| {
                Some(format!("https://reddit.com/user/{}", moderator.name))
            }),
            icon_url: moderator.icon_url.clone(),
        });
    }

    builder.build()
}

fn modmail_embed(message_author: Option<&str>, subreddit: &str) -> Embed {
    let mut builder = Embed::builder()
        .title("\u{1F4E8} New Modmail Message")
        .description("A new modmail message has been received")
        .color(colors::MODMAIL)
        .field("Subreddit", subreddit, true)
        .field("Status", "New Message", true)
        .timestamp_now()
        .footer(format!("{RELAY_USERNAME} - Modmail"));

    if let Some(author) = message_author {
        builder = builder.field("From", format_username(Some(author)), true);
    }

    builder.build()
}

fn post_report_embed(
    post: &Post,
    reason: Option<&str>,
    report_count: Option<u32>,
    subreddit: &str,
) -> Embed {
    let mut builder = Embed::builder()
        .title("\u{1F6A8} Post Reported")
        .description("Post has been reported by users")
        .url(permalink_url(&post.permalink))
        .color(colors::REPORT)
        .field("Post Title", preview(&post.title, 100), false)
        .field("Author", format_username(post.author_name.as_deref()), true)
        .field("Subreddit", subreddit, true);

    if let Some(reason) = reason {
        builder = builder.field("Reason", reason, true);
    }
    if let Some(count) = report_count {
        builder = builder.field("Reports", count.to_string(), true);
    }

    builder
        .timestamp_now()
        .footer(format!("{RELAY_USERNAME} - Reports"))
        .build()
}

fn comment_report_embed(
    comment: &Comment,
    reason: Option<&str>,
    report_count: Option<u32>,
    subreddit: &str,
) -> Embed {
    let mut builder = Embed::builder()
        .title("\u{1F6A8} Comment Reported")
        .description("Comment has been reported by users")
        .url(permalink_url(&comment.permalink))
        .color(colors::REPORT)
        .field("Comment", comment_body_preview(comment, 200), false)
        .field(
            "Author",
            format_username(comment.author_name.as_deref()),
            true,
        )
        .field("Subreddit", subreddit, true);

    if let Some(reason) = reason {
        builder = builder.field("Reason", reason, true);
    }
    if let Some(count) = report_count {
        builder = builder.field("Reports", count.to_string(), true);
    }

    builder
        .timestamp_now()
        .footer(format!("{RELAY_USERNAME} - Reports"))
        .build()
}

fn automod_post_embed(post: &Post, subreddit: &str) -> Embed {
    Embed::builder()
        .title("\u{1F916} AutoModerator Filtered Post")
        .description("Post has been filtered by AutoModerator and needs review")
        .url(permalink_url(&post.permalink))
        .color(colors::MODQUEUE)
        .field("Post Title", preview(&post.title, 100), false)
        .field("Author", format_username(post.author_name.as_deref()), true)
        .field("Subreddit", subreddit, true)
        .field("Score", format_score(post.score), true)
        .timestamp_now()
        .footer(format!("{RELAY_USERNAME} - AutoMod Filter"))
        .build()
}

fn automod_comment_embed(comment: &Comment, subreddit: &str) -> Embed {
    let author_name = format_username(comment.author_name.as_deref());
    let author = EmbedAuthor {
        url: comment
            .author_name
            .as_deref()
            .map(|name| format!("https://reddit.com/user/{name}")),
        icon_url: comment
            .author_name
            .as_deref()
            .map(|name| format!("https://www.reddit.com/user/{name}/avatar.png")),
        name: author_name,
    };

    Embed::builder()
        .title("\u{1F916} AutoModerator Filtered Comment")
        .description(comment_body_preview(comment, 200))
        .url(permalink_url(&comment.permalink))
        .color(colors::MODQUEUE)
        .author(author)
        .field("Subreddit", subreddit, true)
        .field("Score", format_score(comment.score), true)
        .build()
}

fn comment_body_preview(comment: &Comment, max_len: usize) -> String {
    match comment.body.as_deref() {
        Some(body) if !body.is_empty() => preview(body, max_len),
        _ => "[deleted]".to_string(),
    }
}
