//! Display helpers for notification text.

use modrelay_webhooks::sanitize::truncate;

/// Formats a username with the `u/` prefix. Deleted accounts render as
/// `[deleted]`.
pub fn format_username(name: Option<&str>) -> String {
    match name {
        None | Some("") | Some("[deleted]") => "[deleted]".to_string(),
        Some(name) if name.starts_with("u/") => name.to_string(),
        Some(name) => format!("u/{name}"),
    }
}

/// Formats a subreddit name with the `r/` prefix.
pub fn format_subreddit(name: &str) -> String {
    if name.is_empty() {
        String::new()
    } else if name.starts_with("r/") {
        name.to_string()
    } else {
        format!("r/{name}")
    }
}

/// Formats a score with `k` / `M` suffixes, e.g. `1.2k`.
pub fn format_score(score: i64) -> String {
    if score.abs() >= 1_000_000 {
        format!("{:.1}M", score as f64 / 1_000_000.0)
    } else if score.abs() >= 1_000 {
        format!("{:.1}k", score as f64 / 1_000.0)
    } else {
        score.to_string()
    }
}

/// Extracts a plain-text preview from markdown content.
///
/// Drops link targets, emphasis markers, headers, and list bullets, then
/// bounds the result. The output still goes through the delivery
/// sanitizer; this only keeps previews readable.
pub fn preview(content: &str, max_len: usize) -> String {
    if content.is_empty() {
        return String::new();
    }

    let mut text = String::with_capacity(content.len());
    for line in content.lines() {
        let line = strip_block_markers(line.trim());
        if line.is_empty() {
            continue;
        }
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(line);
    }

    let stripped: String = strip_links(&text)
        .chars()
        .filter(|c| !matches!(c, '*' | '_' | '`' | '~'))
        .collect();

    truncate(stripped.trim(), max_len)
}

/// Removes a leading header (`## `) or list marker (`- `, `* `, `+ `).
fn strip_block_markers(line: &str) -> &str {
    let hashes = line.len() - line.trim_start_matches('#').len();
    if hashes > 0 && line[hashes..].starts_with(' ') {
        return line[hashes..].trim_start();
    }

    for marker in ["- ", "* ", "+ "] {
        if let Some(rest) = line.strip_prefix(marker) {
            return rest;
        }
    }
    line
}

/// Rewrites `[text](url)` as `text`.
fn strip_links(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('[') {
        out.push_str(&rest[..open]);
        let after = &rest[open..];

        let link = after.find(']').and_then(|close| {
            let tail = &after[close + 1..];
            if tail.starts_with('(') {
                // after_link is one past the closing paren
                tail.find(')').map(|end| (close, close + 2 + end))
            } else {
                None
            }
        });

        match link {
            Some((close, after_link)) => {
                out.push_str(&after[1..close]);
                rest = &after[after_link..];
            }
            None => {
                out.push('[');
                rest = &rest[open + 1..];
            }
        }
    }

    out.push_str(rest);
    out
}
