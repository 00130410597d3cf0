//! Comment and message stream loading.

use echo_flux::StateStore;
use tracing::{error, info};

use crate::config::Streams;
use crate::handlers::{InboxContext, set_error_banner};
use crate::request::RefreshReq;
use crate::state::*;

pub const COMMENTS_FALLBACK: &str = "Failed to fetch comments";
pub const MESSAGES_FALLBACK: &str = "Failed to fetch messages";

/// Handle `inbox/initialize`.
pub async fn handle_initialize(store: &StateStore, ctx: &InboxContext) {
    if !store.contains(CommentsState::PATH) {
        store.set(CommentsState::PATH, CommentsState::default());
    }
    if !store.contains(MessagesState::PATH) {
        store.set(MessagesState::PATH, MessagesState::default());
    }
    if !store.contains(CopiedState::PATH) {
        store.set(CopiedState::PATH, CopiedState::default());
    }
    load(store, ctx, ctx.config.streams).await;
}

/// Handle `inbox/refresh`.
pub async fn handle_refresh(req: &RefreshReq, store: &StateStore, ctx: &InboxContext) {
    load(store, ctx, req.streams).await;
}

/// Clear the banner and fetch the selected streams concurrently.
async fn load(store: &StateStore, ctx: &InboxContext, streams: Streams) {
    store.set(ErrorBanner::PATH, ErrorBanner(None));

    let comments = async {
        if streams.comments() {
            load_comments(store, ctx).await;
        }
    };
    let messages = async {
        if streams.messages() {
            load_messages(store, ctx).await;
        }
    };
    tokio::join!(comments, messages);
}

async fn load_comments(store: &StateStore, ctx: &InboxContext) {
    set_comments_loading(store, true);

    match ctx.api.latest_comments().await {
        Ok(resp) => {
            info!(count = resp.comments.len(), sample = resp.is_mock, "comments loaded");
            store.set(CommentsState::PATH, CommentsState {
                items: resp.comments,
                loading: false,
                sample_data: resp.is_mock,
            });
        }
        Err(e) => {
            error!(error = %e, "fetch comments failed");
            set_comments_loading(store, false);
            set_error_banner(store, &e, COMMENTS_FALLBACK);
        }
    }
}

async fn load_messages(store: &StateStore, ctx: &InboxContext) {
    set_messages_loading(store, true);

    match ctx.api.latest_messages().await {
        Ok(resp) => {
            info!(count = resp.messages.len(), "messages loaded");
            store.set(MessagesState::PATH, MessagesState {
                items: resp.messages,
                loading: false,
            });
        }
        Err(e) => {
            error!(error = %e, "fetch messages failed");
            set_messages_loading(store, false);
            set_error_banner(store, &e, MESSAGES_FALLBACK);
        }
    }
}

// Loaded items stay visible while loading and after a failure.
fn set_comments_loading(store: &StateStore, loading: bool) {
    store.update(CommentsState::PATH, |cur: Option<&CommentsState>| CommentsState {
        loading,
        ..cur.cloned().unwrap_or_default()
    });
}

fn set_messages_loading(store: &StateStore, loading: bool) {
    store.update(MessagesState::PATH, |cur: Option<&MessagesState>| MessagesState {
        loading,
        ..cur.cloned().unwrap_or_default()
    });
}
