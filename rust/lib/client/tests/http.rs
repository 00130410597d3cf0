//! EchoClient against an in-process axum server speaking the backend's
//! wire format.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};

use echo_client::{ApiError, EchoClient, InboxApi, NoAuth, StaticToken, SuggestTarget};

const TOKEN: &str = "golden-token";

#[derive(Default)]
struct Seen {
    forms: Vec<HashMap<String, String>>,
    auth: Vec<Option<String>>,
}

type Shared = Arc<Mutex<Seen>>;

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

async fn comments(State(seen): State<Shared>, headers: HeaderMap) -> Response {
    let token = bearer(&headers);
    seen.lock().unwrap().auth.push(token.clone());
    if token.as_deref() != Some(TOKEN) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({"detail": "Not authenticated"})),
        )
            .into_response();
    }
    Json(serde_json::json!({
        "comments": [
            [{"id": "c1", "username": "ana", "text": "love this",
              "timestamp": "2024-05-01T12:00:00+0000", "post_id": "p1",
              "post_caption": "sunset", "profile_pic_url": "https://cdn/ana.jpg"}, true]
        ],
        "is_mock": false
    }))
    .into_response()
}

async fn messages() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({"detail": "Instagram account is not connected"})),
    )
        .into_response()
}

async fn suggest_comment(
    State(seen): State<Shared>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    seen.lock().unwrap().forms.push(form.clone());
    Json(serde_json::json!({
        "suggested_reply": {"text": format!("Thanks for {}!", form["comment_id"]),
                            "tone": "warm", "includes_cta": true},
        "alternative_replies": [
            {"text": "Appreciate it", "tone": "casual"},
            {"text": "Glad you enjoyed it", "tone": "friendly"}
        ]
    }))
    .into_response()
}

async fn suggest_message(
    State(seen): State<Shared>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    seen.lock().unwrap().forms.push(form);
    (StatusCode::OK, "not json").into_response()
}

async fn start_test_server() -> (String, Shared) {
    let seen: Shared = Arc::new(Mutex::new(Seen::default()));
    let app = Router::new()
        .route("/api/v1/comments/latest", get(comments))
        .route("/api/v1/message/latest", get(messages))
        .route("/api/v1/comments/suggest-reply", post(suggest_comment))
        .route("/api/v1/messages/suggest-reply", post(suggest_message))
        .with_state(seen.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (base_url, seen)
}

#[tokio::test]
async fn latest_comments_sends_bearer_and_decodes() {
    let (base_url, seen) = start_test_server().await;
    let client = EchoClient::new(&base_url, Arc::new(StaticToken::new(TOKEN)));

    let resp = client.latest_comments().await.unwrap();
    assert_eq!(resp.comments.len(), 1);
    let (comment, is_new) = &resp.comments[0];
    assert_eq!(comment.id, "c1");
    assert_eq!(comment.post_id.as_deref(), Some("p1"));
    assert!(*is_new);
    assert_eq!(seen.lock().unwrap().auth, vec![Some(TOKEN.to_string())]);
}

#[tokio::test]
async fn missing_token_surfaces_detail() {
    let (base_url, _) = start_test_server().await;
    let client = EchoClient::new(&base_url, Arc::new(NoAuth));

    let err = client.latest_comments().await.unwrap_err();
    match &err {
        ApiError::Server { status, .. } => assert_eq!(*status, 401),
        other => panic!("expected server error, got {:?}", other),
    }
    assert_eq!(err.detail(), Some("Not authenticated"));
}

#[tokio::test]
async fn latest_messages_error_detail() {
    let (base_url, _) = start_test_server().await;
    let client = EchoClient::new(&base_url, Arc::new(NoAuth));

    let err = client.latest_messages().await.unwrap_err();
    assert_eq!(err.detail(), Some("Instagram account is not connected"));
}

#[tokio::test]
async fn comment_suggestion_posts_comment_and_post_ids() {
    let (base_url, seen) = start_test_server().await;
    let client = EchoClient::new(&base_url, Arc::new(NoAuth));

    let set = client
        .suggest_reply(&SuggestTarget::Comment {
            comment_id: "c1".into(),
            post_id: Some("p1".into()),
        })
        .await
        .unwrap();

    assert_eq!(set.primary.text, "Thanks for c1!");
    assert_eq!(set.primary.includes_cta, Some(true));
    assert_eq!(set.alternatives[1].tone, "friendly");

    let seen = seen.lock().unwrap();
    let forms = &seen.forms;
    assert_eq!(forms[0].get("comment_id").map(String::as_str), Some("c1"));
    assert_eq!(forms[0].get("post_id").map(String::as_str), Some("p1"));
}

#[tokio::test]
async fn comment_suggestion_without_post_id_omits_field() {
    let (base_url, seen) = start_test_server().await;
    let client = EchoClient::new(&base_url, Arc::new(NoAuth));

    client
        .suggest_reply(&SuggestTarget::Comment { comment_id: "c9".into(), post_id: None })
        .await
        .unwrap();

    let seen = seen.lock().unwrap();
    let forms = &seen.forms;
    assert!(!forms[0].contains_key("post_id"));
}

#[tokio::test]
async fn undecodable_suggestion_is_decode_error() {
    let (base_url, seen) = start_test_server().await;
    let client = EchoClient::new(&base_url, Arc::new(NoAuth));

    let err = client
        .suggest_reply(&SuggestTarget::Message { message_id: "m1".into() })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
    assert_eq!(err.detail(), None);
    assert_eq!(
        seen.lock().unwrap().forms[0].get("message_id").map(String::as_str),
        Some("m1")
    );
}

#[tokio::test]
async fn unreachable_server_is_network_error() {
    let client = EchoClient::new("http://127.0.0.1:9", Arc::new(NoAuth));
    let err = client.latest_messages().await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}
