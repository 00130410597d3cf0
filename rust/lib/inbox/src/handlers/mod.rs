//! Request handlers and their Flux wiring.
//!
//! Each handler is a free function taking the typed request, the store and
//! the shared context. `register_handlers` downcasts payloads and routes
//! them.

pub mod copy_handlers;
pub mod feed_handlers;
pub mod suggestion_handlers;

use std::sync::{Arc, Mutex};

use echo_client::{ApiError, InboxApi};
use echo_flux::{Flux, StateStore};

use crate::clipboard::Clipboard;
use crate::config::FeedConfig;
use crate::request::*;
use crate::session::Session;
use crate::state::ErrorBanner;

/// Everything the handlers share.
pub struct InboxContext {
    pub api: Arc<dyn InboxApi>,
    pub clipboard: Arc<dyn Clipboard>,
    pub config: FeedConfig,
    pub session: Mutex<Session>,
}

impl InboxContext {
    pub fn new(api: Arc<dyn InboxApi>, clipboard: Arc<dyn Clipboard>, config: FeedConfig) -> Self {
        let session = Mutex::new(Session::new(config.suggestion_capacity));
        Self {
            api,
            clipboard,
            config,
            session,
        }
    }
}

/// Banner text for a failed call: the server's `detail` verbatim, else
/// the operation's fallback.
pub(crate) fn set_error_banner(store: &StateStore, err: &ApiError, fallback: &str) {
    let text = err.detail().unwrap_or(fallback).to_string();
    store.set(ErrorBanner::PATH, ErrorBanner(Some(text)));
}

pub fn register_handlers(flux: &Flux, ctx: Arc<InboxContext>) {
    // inbox/initialize
    {
        let ctx = ctx.clone();
        flux.on(InitializeReq::PATH, move |_, _, store: Arc<StateStore>| {
            let ctx = ctx.clone();
            async move {
                feed_handlers::handle_initialize(&store, &ctx).await;
            }
        });
    }

    // inbox/refresh
    {
        let ctx = ctx.clone();
        flux.on(RefreshReq::PATH, move |path, payload, store: Arc<StateStore>| {
            let ctx = ctx.clone();
            async move {
                let Some(req) = payload.downcast_ref::<RefreshReq>() else {
                    tracing::warn!(%path, "unexpected payload");
                    return;
                };
                feed_handlers::handle_refresh(req, &store, &ctx).await;
            }
        });
    }

    // suggestions/toggle
    {
        let ctx = ctx.clone();
        flux.on(ToggleSuggestionsReq::PATH, move |path, payload, store: Arc<StateStore>| {
            let ctx = ctx.clone();
            async move {
                let Some(req) = payload.downcast_ref::<ToggleSuggestionsReq>() else {
                    tracing::warn!(%path, "unexpected payload");
                    return;
                };
                suggestion_handlers::handle_toggle(req, &store, &ctx).await;
            }
        });
    }

    // suggestions/edit
    {
        let ctx = ctx.clone();
        flux.on(EditReplyReq::PATH, move |path, payload, store: Arc<StateStore>| {
            let ctx = ctx.clone();
            async move {
                let Some(req) = payload.downcast_ref::<EditReplyReq>() else {
                    tracing::warn!(%path, "unexpected payload");
                    return;
                };
                suggestion_handlers::handle_edit(req, &store, &ctx);
            }
        });
    }

    // clipboard/copy
    flux.on(CopyReq::PATH, move |path, payload, store: Arc<StateStore>| {
        let ctx = ctx.clone();
        async move {
            let Some(req) = payload.downcast_ref::<CopyReq>() else {
                tracing::warn!(%path, "unexpected payload");
                return;
            };
            copy_handlers::handle_copy(req, &store, &ctx).await;
        }
    });
}
