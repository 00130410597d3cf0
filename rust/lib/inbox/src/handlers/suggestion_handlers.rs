//! Suggestion panel handlers: toggle with fetch-once, and reply edits.

use echo_client::SuggestTarget;
use echo_flux::StateStore;
use tracing::{debug, error, info};

use crate::handlers::{InboxContext, set_error_banner};
use crate::key::{InteractionKind, ItemKey};
use crate::request::{EditReplyReq, ToggleSuggestionsReq};
use crate::session::ToggleOutcome;
use crate::state::{CommentsState, PanelView};

pub const SUGGESTION_FALLBACK: &str = "Failed to generate reply suggestion";

/// Handle `suggestions/toggle`.
///
/// Completes after the fetch when the toggle started one; a result that
/// lands after the panel was collapsed is still cached.
pub async fn handle_toggle(req: &ToggleSuggestionsReq, store: &StateStore, ctx: &InboxContext) {
    let key = &req.key;
    // Check-and-mark in one lock section so re-entrant toggles never
    // issue a second request.
    let outcome = ctx.session.lock().unwrap().toggle(key);
    publish_panel(store, ctx, key);
    debug!(%key, ?outcome, "suggestions toggled");

    if outcome != ToggleOutcome::FetchStarted {
        return;
    }

    let target = suggest_target(store, key);
    let fetched = match ctx.api.suggest_reply(&target).await {
        Ok(set) => {
            info!(%key, alternatives = set.alternatives.len(), "suggestions fetched");
            Some(set)
        }
        Err(e) => {
            error!(%key, error = %e, "suggest reply failed");
            set_error_banner(store, &e, SUGGESTION_FALLBACK);
            None
        }
    };

    let evicted = ctx.session.lock().unwrap().finish_fetch(key, fetched);
    publish_panel(store, ctx, key);
    if let Some(evicted) = evicted {
        debug!(key = %evicted, "suggestions evicted");
        publish_panel(store, ctx, &evicted);
    }
}

/// Handle `suggestions/edit`.
pub fn handle_edit(req: &EditReplyReq, store: &StateStore, ctx: &InboxContext) {
    ctx.session
        .lock()
        .unwrap()
        .edit(req.key.clone(), req.slot, req.text.clone());
    publish_panel(store, ctx, &req.key);
}

/// Write `key`'s panel to the store. The session lock is released before
/// the write so subscribers may read back through the feed.
pub(crate) fn publish_panel(store: &StateStore, ctx: &InboxContext, key: &ItemKey) {
    let view = ctx.session.lock().unwrap().panel(key);
    store.set(&PanelView::path(key), view);
}

fn suggest_target(store: &StateStore, key: &ItemKey) -> SuggestTarget {
    match key.kind {
        InteractionKind::Comment => SuggestTarget::Comment {
            comment_id: key.id.clone(),
            post_id: store
                .get_as::<CommentsState>(CommentsState::PATH)
                .and_then(|comments| comments.post_id_of(&key.id)),
        },
        InteractionKind::Message => SuggestTarget::Message {
            message_id: key.id.clone(),
        },
    }
}
