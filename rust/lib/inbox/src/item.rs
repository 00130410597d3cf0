//! The unified feed: comments and messages merged newest-first.

use chrono::{DateTime, NaiveDateTime, Utc};

use echo_client::{CommentItem, MessageItem};

use crate::key::ItemKey;

/// Shown when a comment carries no profile picture.
pub const PLACEHOLDER_AVATAR: &str = "https://via.placeholder.com/40";

/// Author handle for messages without a sender.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// One comment or direct message, normalised for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionItem {
    pub key: ItemKey,
    pub author_handle: String,
    pub body_text: String,
    /// Parsed sort instant; `None` when the upstream value is missing or
    /// unparseable.
    pub timestamp: Option<DateTime<Utc>>,
    pub is_new: bool,
    pub detail: ItemDetail,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ItemDetail {
    Comment {
        post_caption: Option<String>,
        post_id: Option<String>,
        avatar_url: String,
    },
    Message,
}

impl InteractionItem {
    pub fn from_comment(comment: &CommentItem, is_new: bool) -> Self {
        Self {
            key: ItemKey::comment(comment.id.clone()),
            author_handle: comment.username.clone(),
            body_text: comment.text.clone(),
            timestamp: comment.timestamp.as_deref().and_then(parse_timestamp),
            is_new,
            detail: ItemDetail::Comment {
                post_caption: comment.post_caption.clone(),
                post_id: comment.post_id.clone(),
                avatar_url: comment
                    .profile_pic_url
                    .clone()
                    .filter(|url| !url.is_empty())
                    .unwrap_or_else(|| PLACEHOLDER_AVATAR.to_string()),
            },
        }
    }

    pub fn from_message(message: &MessageItem, is_new: bool) -> Self {
        let author = message
            .from
            .as_ref()
            .and_then(|from| from.username.clone())
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());
        Self {
            key: ItemKey::message(message.id.clone()),
            author_handle: author,
            body_text: message.message.clone(),
            timestamp: message.created_time.as_deref().and_then(parse_timestamp),
            is_new,
            detail: ItemDetail::Message,
        }
    }

    pub fn post_id(&self) -> Option<&str> {
        match &self.detail {
            ItemDetail::Comment { post_id, .. } => post_id.as_deref(),
            ItemDetail::Message => None,
        }
    }
}

/// Merge both streams into one list, newest first.
///
/// The sort is stable over "all comments, then all messages", so equal
/// instants keep comments ahead of messages and upstream order within a
/// kind. Items without a parseable instant go last.
pub fn merge_and_sort(
    comments: &[(CommentItem, bool)],
    messages: &[(MessageItem, bool)],
) -> Vec<InteractionItem> {
    let mut items: Vec<InteractionItem> = comments
        .iter()
        .map(|(c, is_new)| InteractionItem::from_comment(c, *is_new))
        .chain(messages.iter().map(|(m, is_new)| InteractionItem::from_message(m, *is_new)))
        .collect();
    items.sort_by(|a, b| match (a.timestamp, b.timestamp) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    items
}

/// Parse the timestamp formats the backend emits.
///
/// Accepts RFC 3339, Graph API style offsets (`+0000`), and naive ISO
/// date-times, which are read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%dT%H:%M:%S%.f%z"] {
        if let Ok(dt) = DateTime::parse_from_str(raw, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for fmt in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    None
}

/// "N minutes ago" under an hour, "N hours ago" under a day, else days.
/// Instants in the future count as zero minutes.
pub fn format_relative(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = (now - at).max(chrono::Duration::zero());
    let hours = elapsed.num_hours();
    if hours < 1 {
        format!("{} minutes ago", elapsed.num_minutes())
    } else if hours < 24 {
        format!("{} hours ago", hours)
    } else {
        format!("{} days ago", hours / 24)
    }
}
