//! HTTP client for the inbox backend.
//!
//! Lists the latest comments and direct messages and asks the backend for
//! AI reply suggestions. Authentication is supplied by a pluggable
//! [`TokenSource`].
//!
//! # Usage
//!
//! ```ignore
//! use echo_client::{EchoClient, InboxApi, StaticToken, SuggestTarget};
//!
//! let client = EchoClient::new("http://localhost:8000", Arc::new(StaticToken::new(token)));
//! let comments = client.latest_comments().await?;
//! let set = client
//!     .suggest_reply(&SuggestTarget::Message { message_id: "m1".into() })
//!     .await?;
//! ```

pub mod model;

use std::sync::Arc;

use serde::de::DeserializeOwned;

pub use model::{
    AlternativeReply, CommentItem, CommentsResponse, MessageItem, MessagesResponse, Sender,
    SuggestTarget, SuggestedReply, SuggestionSet,
};

pub const COMMENTS_LATEST_PATH: &str = "/api/v1/comments/latest";
pub const MESSAGES_LATEST_PATH: &str = "/api/v1/message/latest";
pub const COMMENT_SUGGEST_PATH: &str = "/api/v1/comments/suggest-reply";
pub const MESSAGE_SUGGEST_PATH: &str = "/api/v1/messages/suggest-reply";

// ── Error ───────────────────────────────────────────────────────────

/// Client-side API error.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP {status}: {message}")]
    Server { status: u16, message: String },

    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    #[error("auth: {0}")]
    Auth(String),

    #[error("decode: {0}")]
    Decode(String),
}

impl ApiError {
    /// Human-readable `detail` sent by the server, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Server { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

/// Pull `detail` out of an error body. FastAPI sends a string for
/// `HTTPException` and a list for validation errors.
fn error_detail(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => match map.get("detail") {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => body.to_string(),
        },
        _ => body.to_string(),
    }
}

// ── TokenSource ─────────────────────────────────────────────────────

/// Pluggable token provider, asked before every request.
///
/// `Ok(None)` sends the request without an Authorization header.
#[async_trait::async_trait]
pub trait TokenSource: Send + Sync + 'static {
    async fn token(&self) -> Result<Option<String>, ApiError>;
}

/// Anonymous requests.
pub struct NoAuth;

#[async_trait::async_trait]
impl TokenSource for NoAuth {
    async fn token(&self) -> Result<Option<String>, ApiError> {
        Ok(None)
    }
}

/// A bearer token obtained elsewhere (the OAuth login lives in the web app).
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

#[async_trait::async_trait]
impl TokenSource for StaticToken {
    async fn token(&self) -> Result<Option<String>, ApiError> {
        if self.0.is_empty() {
            return Err(ApiError::Auth("empty access token".into()));
        }
        Ok(Some(self.0.clone()))
    }
}

// ── InboxApi ────────────────────────────────────────────────────────

/// The backend calls the interaction feed depends on.
#[async_trait::async_trait]
pub trait InboxApi: Send + Sync + 'static {
    async fn latest_comments(&self) -> Result<CommentsResponse, ApiError>;

    async fn latest_messages(&self) -> Result<MessagesResponse, ApiError>;

    async fn suggest_reply(&self, target: &SuggestTarget) -> Result<SuggestionSet, ApiError>;
}

// ── EchoClient ──────────────────────────────────────────────────────

/// reqwest-backed [`InboxApi`].
pub struct EchoClient {
    http: reqwest::Client,
    base_url: String,
    token_source: Arc<dyn TokenSource>,
}

impl EchoClient {
    pub fn new(base_url: impl Into<String>, token_source: Arc<dyn TokenSource>) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url, token_source)
    }

    /// Use a preconfigured reqwest client (timeouts, proxies, TLS).
    pub fn with_http_client(
        http: reqwest::Client,
        base_url: impl Into<String>,
        token_source: Arc<dyn TokenSource>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token_source,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn authed(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder, ApiError> {
        match self.token_source.token().await? {
            Some(token) => Ok(builder.bearer_auth(token)),
            None => Ok(builder),
        }
    }

    /// Map non-2xx to `ApiError::Server` and decode the body otherwise.
    async fn parse<R: DeserializeOwned>(resp: reqwest::Response) -> Result<R, ApiError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Server {
                status: status.as_u16(),
                message: error_detail(&body),
            });
        }
        resp.json::<R>()
            .await
            .map_err(|e| ApiError::Decode(format!("response body: {}", e)))
    }
}

#[async_trait::async_trait]
impl InboxApi for EchoClient {
    async fn latest_comments(&self) -> Result<CommentsResponse, ApiError> {
        let req = self.authed(self.http.get(self.url(COMMENTS_LATEST_PATH))).await?;
        let resp: CommentsResponse = Self::parse(req.send().await?).await?;
        tracing::debug!(count = resp.comments.len(), is_mock = resp.is_mock, "fetched comments");
        Ok(resp)
    }

    async fn latest_messages(&self) -> Result<MessagesResponse, ApiError> {
        let req = self.authed(self.http.get(self.url(MESSAGES_LATEST_PATH))).await?;
        let resp: MessagesResponse = Self::parse(req.send().await?).await?;
        tracing::debug!(count = resp.messages.len(), "fetched messages");
        Ok(resp)
    }

    async fn suggest_reply(&self, target: &SuggestTarget) -> Result<SuggestionSet, ApiError> {
        let (path, form): (&str, Vec<(&str, &str)>) = match target {
            SuggestTarget::Comment { comment_id, post_id } => {
                let mut form = vec![("comment_id", comment_id.as_str())];
                if let Some(post_id) = post_id {
                    form.push(("post_id", post_id.as_str()));
                }
                (COMMENT_SUGGEST_PATH, form)
            }
            SuggestTarget::Message { message_id } => {
                (MESSAGE_SUGGEST_PATH, vec![("message_id", message_id.as_str())])
            }
        };
        let req = self.authed(self.http.post(self.url(path)).form(&form)).await?;
        Self::parse(req.send().await?).await
    }
}
