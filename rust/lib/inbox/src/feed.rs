//! `InteractionFeed`: the typed front door over the Flux store and router.
//!
//! Every mutation goes through a request so that a UI driving the same
//! `Flux` sees identical state; the accessors read back from the store or
//! the session.

use std::sync::Arc;

use echo_client::{InboxApi, SuggestionSet};
use echo_flux::Flux;

use crate::clipboard::Clipboard;
use crate::config::{FeedConfig, Streams};
use crate::handlers::{InboxContext, register_handlers};
use crate::item::{InteractionItem, merge_and_sort};
use crate::key::{CopyTarget, ItemKey, ReplySlot};
use crate::request::*;
use crate::state::*;

pub struct InteractionFeed {
    flux: Flux,
    ctx: Arc<InboxContext>,
}

impl InteractionFeed {
    pub fn new(api: Arc<dyn InboxApi>, clipboard: Arc<dyn Clipboard>, config: FeedConfig) -> Self {
        let flux = Flux::new();
        let ctx = Arc::new(InboxContext::new(api, clipboard, config));
        register_handlers(&flux, Arc::clone(&ctx));
        Self { flux, ctx }
    }

    pub fn flux(&self) -> &Flux {
        &self.flux
    }

    pub fn config(&self) -> &FeedConfig {
        &self.ctx.config
    }

    // ── Requests ──

    /// Load the configured streams.
    pub async fn initialize(&self) {
        self.flux.emit(InitializeReq::PATH, InitializeReq).await;
    }

    /// Re-fetch the configured streams. Panels, cached suggestions and
    /// edits are kept.
    pub async fn refresh_all(&self) {
        self.refresh(self.ctx.config.streams).await;
    }

    pub async fn refresh_comments(&self) {
        self.refresh(Streams::Comments).await;
    }

    pub async fn refresh_messages(&self) {
        self.refresh(Streams::Messages).await;
    }

    async fn refresh(&self, streams: Streams) {
        self.flux.emit(RefreshReq::PATH, RefreshReq { streams }).await;
    }

    /// Expand or collapse `key`'s panel. The first expansion fetches
    /// suggestions and completes once they arrive.
    pub async fn toggle_suggestions(&self, key: ItemKey) {
        self.flux
            .emit(ToggleSuggestionsReq::PATH, ToggleSuggestionsReq { key })
            .await;
    }

    pub async fn edit_reply(&self, key: ItemKey, slot: ReplySlot, text: impl Into<String>) {
        let req = EditReplyReq {
            key,
            slot,
            text: text.into(),
        };
        self.flux.emit(EditReplyReq::PATH, req).await;
    }

    pub async fn copy(&self, text: impl Into<String>, marker: CopyTarget) {
        let req = CopyReq {
            text: text.into(),
            marker,
        };
        self.flux.emit(CopyReq::PATH, req).await;
    }

    /// Copy the displayed text of one reply. Returns false when `key` has
    /// no cached suggestions or no such slot.
    pub async fn copy_reply(&self, key: &ItemKey, slot: ReplySlot) -> bool {
        let Some(text) = self.reply_text(key, slot) else {
            return false;
        };
        self.copy(text, CopyTarget::new(key.clone(), slot)).await;
        true
    }

    // ── Reads ──

    /// Both streams merged newest first, recomputed on every call.
    pub fn items(&self) -> Vec<InteractionItem> {
        let comments = self.comments_state();
        let messages = self.messages_state();
        merge_and_sort(&comments.items, &messages.items)
    }

    pub fn comments_loading(&self) -> bool {
        self.comments_state().loading
    }

    pub fn messages_loading(&self) -> bool {
        self.messages_state().loading
    }

    pub fn is_sample_data(&self) -> bool {
        self.comments_state().sample_data
    }

    pub fn error(&self) -> Option<String> {
        self.flux
            .get_as::<ErrorBanner>(ErrorBanner::PATH)
            .and_then(|banner| banner.0)
    }

    pub fn last_copied(&self) -> Option<CopyTarget> {
        self.flux
            .get_as::<CopiedState>(CopiedState::PATH)
            .and_then(|copied| copied.marker)
    }

    pub fn is_copied(&self, marker: &CopyTarget) -> bool {
        self.last_copied().as_ref() == Some(marker)
    }

    pub fn is_expanded(&self, key: &ItemKey) -> bool {
        self.ctx.session.lock().unwrap().is_expanded(key)
    }

    pub fn is_loading(&self, key: &ItemKey) -> bool {
        self.ctx.session.lock().unwrap().is_loading(key)
    }

    pub fn suggestions(&self, key: &ItemKey) -> Option<Arc<SuggestionSet>> {
        self.ctx.session.lock().unwrap().suggestions(key)
    }

    /// The edit for a slot if any, else `original`.
    pub fn display_text(&self, key: &ItemKey, slot: ReplySlot, original: &str) -> String {
        self.ctx
            .session
            .lock()
            .unwrap()
            .display_text(key, slot, original)
            .to_string()
    }

    pub fn reply_text(&self, key: &ItemKey, slot: ReplySlot) -> Option<String> {
        self.ctx.session.lock().unwrap().reply_text(key, slot)
    }

    /// The last published view of `key`'s panel.
    pub fn panel(&self, key: &ItemKey) -> Option<PanelView> {
        self.flux.get_as(&PanelView::path(key))
    }

    fn comments_state(&self) -> CommentsState {
        self.flux
            .get_as(CommentsState::PATH)
            .unwrap_or_default()
    }

    fn messages_state(&self) -> MessagesState {
        self.flux
            .get_as(MessagesState::PATH)
            .unwrap_or_default()
    }
}
