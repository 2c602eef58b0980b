//! Moderator-action display tables and mention handling.

use modrelay_events::Moderator;
use modrelay_webhooks::colors;

/// Account names the platform uses for its own automated actions.
const PLATFORM_ACTORS: [&str; 9] = [
    "reddit",
    "automoderator",
    "anti-evil operations",
    "reddit-anti-evil-operations",
    "reddit-safety",
    "reddit-legal",
    "reddit-admin",
    "reddit-spam-filter",
    "reddit-trust-and-safety",
];

/// Mod-log action display: `(action key, display name, emoji, color)`.
const MOD_ACTIONS: [(&str, &str, &str, u32); 18] = [
    ("banuser", "User Banned", "\u{1F528}", colors::BAN),
    ("unbanuser", "User Unbanned", "\u{1F513}", colors::APPROVE),
    ("muteuser", "User Muted", "\u{1F507}", colors::SPAM),
    ("unmuteuser", "User Unmuted", "\u{1F50A}", colors::APPROVE),
    ("lock", "Post/Comment Locked", "\u{1F512}", colors::SPAM),
    ("unlock", "Post/Comment Unlocked", "\u{1F513}", colors::APPROVE),
    ("sticky", "Post Stickied", "\u{1F4CC}", 0x3b82f6),
    ("unsticky", "Post Unstickied", "\u{1F4CC}", colors::INFO),
    ("distinguish", "Distinguished", "\u{1F3F7}\u{FE0F}", 0x8b5cf6),
    ("undistinguish", "Undistinguished", "\u{1F3F7}\u{FE0F}", colors::INFO),
    ("marknsfw", "Marked NSFW", "\u{1F51E}", colors::REMOVE),
    ("unmarknsfw", "Unmarked NSFW", "\u{1F51E}", colors::INFO),
    ("approvelink", "Approved Post", "\u{2705}", colors::APPROVE),
    ("approvecomment", "Approved Comment", "\u{2705}", colors::APPROVE),
    ("removelink", "Removed Post", "\u{1F5D1}\u{FE0F}", colors::REMOVE),
    ("removecomment", "Removed Comment", "\u{1F5D1}\u{FE0F}", colors::REMOVE),
    ("spamlink", "Marked Post as Spam", "\u{1F6AB}", colors::SPAM),
    ("spamcomment", "Marked Comment as Spam", "\u{1F6AB}", colors::SPAM),
];

/// How a mod-log action renders in a notification.
#[derive(Debug, Clone)]
pub struct ActionDisplay {
    /// Human-readable action name; raw action key for unknown actions.
    pub name: String,
    pub emoji: &'static str,
    pub color: u32,
}

/// Looks up the display entry for a raw action key.
pub fn action_display(action: &str) -> ActionDisplay {
    for (key, name, emoji, color) in MOD_ACTIONS {
        if key == action {
            return ActionDisplay {
                name: name.to_string(),
                emoji,
                color,
            };
        }
    }

    ActionDisplay {
        name: action.to_string(),
        emoji: "\u{2699}\u{FE0F}",
        color: colors::INFO,
    }
}

/// Whether a log action was taken by the platform rather than a human
/// moderator. No attributed moderator means a system action.
pub fn is_platform_automated(moderator: Option<&Moderator>) -> bool {
    match moderator {
        None => true,
        Some(moderator) => {
            let name = moderator.name.to_lowercase();
            PLATFORM_ACTORS.iter().any(|actor| name.contains(actor))
        }
    }
}

/// Renders a role mention for alert text.
///
/// A 17-19 digit value is a snowflake role ID and uses the provider's
/// mention syntax; anything else is treated as a role name.
pub fn format_mention(role: &str) -> String {
    let is_snowflake =
        (17..=19).contains(&role.len()) && role.chars().all(|c| c.is_ascii_digit());

    if is_snowflake {
        format!("<@&{role}>")
    } else {
        format!("@{role}")
    }
}

/// Prefixes alert text with the configured mention, when present.
pub fn mention_prefix(mention_role: Option<&str>, text: &str) -> Option<String> {
    mention_role.map(|role| format!("{} {}", format_mention(role), text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_action() {
        let display = action_display("removelink");
        assert_eq!(display.name, "Removed Post");
        assert_eq!(display.color, colors::REMOVE);
    }

    #[test]
    fn test_unknown_action_falls_back() {
        let display = action_display("editflair");
        assert_eq!(display.name, "editflair");
        assert_eq!(display.color, colors::INFO);
    }

    #[test]
    fn test_platform_automated_detection() {
        assert!(is_platform_automated(None));
        assert!(is_platform_automated(Some(&Moderator::named("AutoModerator"))));
        assert!(is_platform_automated(Some(&Moderator::named(
            "reddit-anti-evil-operations"
        ))));
        assert!(!is_platform_automated(Some(&Moderator::named("human_mod"))));
    }

    #[test]
    fn test_mention_snowflake_vs_name() {
        assert_eq!(format_mention("123456789012345678"), "<@&123456789012345678>");
        assert_eq!(format_mention("Moderators"), "@Moderators");
        // Too short to be a snowflake
        assert_eq!(format_mention("12345"), "@12345");
    }

    #[test]
    fn test_mention_prefix() {
        assert_eq!(
            mention_prefix(Some("Mods"), "Post reported").as_deref(),
            Some("@Mods Post reported")
        );
        assert_eq!(mention_prefix(None, "Post reported"), None);
    }
}
