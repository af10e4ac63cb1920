use chrono::{DateTime, Utc};

use crate::config::SHARE_PREVIEW_CHARS;
use crate::models::models::{Post, User};

const MINUTE_MS: i64 = 60_000;
const HOUR_MS: i64 = 3_600_000;
const DAY_MS: i64 = 86_400_000;

/// "Just now", "5m ago", "3h ago", "2d ago", or a calendar date once the
/// timestamp is more than a week old.
pub fn format_relative(timestamp: i64, now: i64) -> String {
    let diff = now - timestamp;
    let minutes = diff / MINUTE_MS;
    let hours = diff / HOUR_MS;
    let days = diff / DAY_MS;

    if days > 7 {
        DateTime::<Utc>::from_timestamp_millis(timestamp)
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| timestamp.to_string())
    } else if days > 0 {
        format!("{}d ago", days)
    } else if hours > 0 {
        format!("{}h ago", hours)
    } else if minutes > 0 {
        format!("{}m ago", minutes)
    } else {
        "Just now".to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
}

impl SharePayload {
    /// Clipboard form: the text followed by the link.
    pub fn clipboard_text(&self, url: &str) -> String {
        format!("{} {}", self.text, url)
    }
}

pub fn share_payload(post: &Post) -> SharePayload {
    let preview: String = post.text.chars().take(SHARE_PREVIEW_CHARS).collect();
    SharePayload {
        title: format!("Post by {}", post.author_name),
        text: format!("{}...", preview),
    }
}

/// Name to show next to a comment; the author may be missing from older data.
pub fn author_label(users: &[User], author_id: i64) -> &str {
    users
        .iter()
        .find(|u| u.id == author_id)
        .map(|u| u.name.as_str())
        .unwrap_or("Unknown User")
}
