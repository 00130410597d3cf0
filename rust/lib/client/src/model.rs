//! Wire types of the inbox REST API.

use serde::{Deserialize, Deserializer, Serialize};

/// A comment on one of the account's posts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentItem {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default, deserialize_with = "opt_id_from_string_or_number")]
    pub post_id: Option<String>,
    #[serde(default)]
    pub post_caption: Option<String>,
    #[serde(default)]
    pub profile_pic_url: Option<String>,
}

/// A direct message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageItem {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(default)]
    pub from: Option<Sender>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub created_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sender {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "opt_id_from_string_or_number")]
    pub id: Option<String>,
}

/// `GET /api/v1/comments/latest`. Each entry is `[comment, is_new]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommentsResponse {
    #[serde(default)]
    pub comments: Vec<(CommentItem, bool)>,
    /// Set when the backend serves sample comments instead of live ones.
    #[serde(default)]
    pub is_mock: bool,
}

/// `GET /api/v1/message/latest`. Each entry is `[message, is_new]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub messages: Vec<(MessageItem, bool)>,
}

/// The primary AI reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedReply {
    pub text: String,
    #[serde(default)]
    pub tone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub includes_cta: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeReply {
    pub text: String,
    #[serde(default)]
    pub tone: String,
}

/// Response of both suggest-reply endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionSet {
    #[serde(rename = "suggested_reply")]
    pub primary: SuggestedReply,
    /// Kept in server order.
    #[serde(rename = "alternative_replies", default)]
    pub alternatives: Vec<AlternativeReply>,
}

/// What a suggestion is requested for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestTarget {
    Comment {
        comment_id: String,
        post_id: Option<String>,
    },
    Message {
        message_id: String,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Unsigned(u64),
    Signed(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Unsigned(n) => n.to_string(),
            RawId::Signed(n) => n.to_string(),
        }
    }
}

fn id_from_string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    RawId::deserialize(d).map(String::from)
}

fn opt_id_from_string_or_number<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Option<String>, D::Error> {
    Option::<RawId>::deserialize(d).map(|raw| raw.map(String::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_decode_pairs_and_numeric_ids() {
        let body = r#"{
            "comments": [
                [{"id": 17, "username": "ana", "text": "love it",
                  "timestamp": "2024-05-01T12:00:00+0000", "post_id": 99,
                  "post_caption": "sunset", "profile_pic_url": "https://cdn/x.jpg"}, true],
                [{"id": "18", "username": "bo", "text": "meh"}, false]
            ],
            "is_mock": true
        }"#;
        let resp: CommentsResponse = serde_json::from_str(body).unwrap();
        assert!(resp.is_mock);
        assert_eq!(resp.comments.len(), 2);
        let (first, is_new) = &resp.comments[0];
        assert_eq!(first.id, "17");
        assert_eq!(first.post_id.as_deref(), Some("99"));
        assert!(*is_new);
        let (second, is_new) = &resp.comments[1];
        assert_eq!(second.timestamp, None);
        assert_eq!(second.post_caption, None);
        assert!(!*is_new);
    }

    #[test]
    fn messages_tolerate_missing_sender() {
        let body = r#"{"messages": [
            [{"id": "m1", "from": {"username": "cy", "id": "42"}, "message": "hi",
              "created_time": "2024-05-01T12:00:00+0000"}, false],
            [{"id": "m2", "message": "anyone?"}, true]
        ]}"#;
        let resp: MessagesResponse = serde_json::from_str(body).unwrap();
        let (m1, _) = &resp.messages[0];
        assert_eq!(m1.from.as_ref().and_then(|f| f.username.as_deref()), Some("cy"));
        let (m2, is_new) = &resp.messages[1];
        assert!(m2.from.is_none());
        assert!(*is_new);
    }

    #[test]
    fn empty_object_decodes_to_empty_lists() {
        let c: CommentsResponse = serde_json::from_str("{}").unwrap();
        let m: MessagesResponse = serde_json::from_str("{}").unwrap();
        assert!(c.comments.is_empty() && !c.is_mock);
        assert!(m.messages.is_empty());
    }

    #[test]
    fn suggestion_keeps_alternative_order_and_analysis() {
        let body = r#"{
            "suggested_reply": {"text": "Thank you!", "tone": "warm",
                                "analysis": {"sentiment": "positive"}, "includes_cta": false},
            "alternative_replies": [
                {"text": "b", "tone": "playful"},
                {"text": "a", "tone": "formal"},
                {"text": "b", "tone": "playful"}
            ]
        }"#;
        let set: SuggestionSet = serde_json::from_str(body).unwrap();
        assert_eq!(set.primary.tone, "warm");
        assert_eq!(set.primary.includes_cta, Some(false));
        assert_eq!(set.primary.analysis.as_ref().unwrap()["sentiment"], "positive");
        let texts: Vec<&str> = set.alternatives.iter().map(|a| a.text.as_str()).collect();
        assert_eq!(texts, vec!["b", "a", "b"]);
    }

    #[test]
    fn suggestion_without_alternatives() {
        let set: SuggestionSet =
            serde_json::from_str(r#"{"suggested_reply": {"text": "ok"}}"#).unwrap();
        assert!(set.alternatives.is_empty());
        assert_eq!(set.primary.tone, "");
    }
}
