//! Payload sanitization.
//!
//! Applied by the delivery client to every outgoing payload. Three
//! concerns: escape markdown control characters so user content cannot
//! restyle the message, neutralize broadcast mentions, and enforce the
//! provider's field length ceilings.

use crate::message::{Embed, NotificationPayload, limits};

/// Markdown control characters the provider renders.
const MARKDOWN_CHARS: [char; 6] = ['*', '_', '`', '~', '|', '\\'];

/// Broadcast mention words that ping entire channels.
const BROADCAST_MENTIONS: [&str; 2] = ["everyone", "here"];

/// Zero-width space inserted after `@` to break mention parsing.
const ZERO_WIDTH_SPACE: char = '\u{200B}';

/// Escapes markdown control characters with a backslash prefix.
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if MARKDOWN_CHARS.contains(&ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Neutralizes `@everyone` / `@here` case-insensitively.
///
/// A zero-width space goes immediately after the `@`, preserving the
/// visible text while breaking the provider's mention match.
pub fn neutralize_mentions(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < text.len() {
        let rest = &text[i..];
        // text[i..] always starts on a char boundary
        let ch = match rest.chars().next() {
            Some(ch) => ch,
            None => break,
        };

        if ch == '@' {
            let after = &rest[1..];
            let matched = BROADCAST_MENTIONS.iter().find(|word| {
                after.len() >= word.len()
                    && after.is_char_boundary(word.len())
                    && after[..word.len()].eq_ignore_ascii_case(word)
            });
            if let Some(word) = matched {
                out.push('@');
                out.push(ZERO_WIDTH_SPACE);
                out.push_str(&after[..word.len()]);
                i += 1 + word.len();
                continue;
            }
        }

        out.push(ch);
        i += ch.len_utf8();
    }
    out
}

/// Truncates to `max_len` characters, appending `...` when cut.
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_len.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Escapes markdown and neutralizes broadcast mentions.
pub fn sanitize_text(text: &str) -> String {
    neutralize_mentions(&escape_markdown(text))
}

/// Sanitizes and bounds one field.
fn clean(text: &str, max_len: usize) -> String {
    truncate(&sanitize_text(text), max_len)
}

/// Sanitizes a full payload, applying the provider's length ceilings to
/// every textual field. Total: never fails, absent fields pass through.
pub fn sanitize_payload(payload: NotificationPayload) -> NotificationPayload {
    NotificationPayload {
        content: payload.content.map(|c| clean(&c, limits::CONTENT)),
        embeds: payload.embeds.into_iter().map(sanitize_embed).collect(),
        username: payload.username,
        avatar_url: payload.avatar_url,
    }
}

fn sanitize_embed(embed: Embed) -> Embed {
    Embed {
        title: embed.title.map(|t| clean(&t, limits::TITLE)),
        description: embed.description.map(|d| clean(&d, limits::DESCRIPTION)),
        fields: embed
            .fields
            .into_iter()
            .map(|mut field| {
                field.name = clean(&field.name, limits::FIELD_NAME);
                field.value = clean(&field.value, limits::FIELD_VALUE);
                field
            })
            .collect(),
        ..embed
    }
}
