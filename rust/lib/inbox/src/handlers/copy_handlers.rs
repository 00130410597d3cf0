//! Clipboard copy with a self-clearing "copied" marker.

use std::sync::Arc;

use echo_flux::StateStore;
use tracing::{debug, warn};

use crate::handlers::InboxContext;
use crate::request::CopyReq;
use crate::state::CopiedState;

/// Handle `clipboard/copy`.
///
/// The clipboard write runs on the blocking pool. A failed write is only
/// logged. On success the marker is set and a timer clears it after
/// `copied_reset`, unless a newer copy replaced it first.
pub async fn handle_copy(req: &CopyReq, store: &Arc<StateStore>, ctx: &InboxContext) {
    let clipboard = Arc::clone(&ctx.clipboard);
    let text = req.text.clone();
    match tokio::task::spawn_blocking(move || clipboard.write_text(&text)).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            warn!(marker = %req.marker, error = %e, "copy to clipboard failed");
            return;
        }
        Err(e) => {
            warn!(marker = %req.marker, error = %e, "clipboard task failed");
            return;
        }
    }

    let copied = store.update(CopiedState::PATH, |cur: Option<&CopiedState>| CopiedState {
        marker: Some(req.marker.clone()),
        generation: cur.map_or(0, |c| c.generation) + 1,
    });
    debug!(marker = %req.marker, generation = copied.generation, "copied");

    let store = Arc::clone(store);
    let delay = ctx.config.copied_reset();
    let generation = copied.generation;
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        if store
            .get_as::<CopiedState>(CopiedState::PATH)
            .is_some_and(|c| c.generation == generation)
        {
            store.update(CopiedState::PATH, |cur: Option<&CopiedState>| match cur {
                Some(c) if c.generation == generation => CopiedState {
                    marker: None,
                    generation,
                },
                Some(c) => c.clone(),
                None => CopiedState::default(),
            });
        }
    });
}
