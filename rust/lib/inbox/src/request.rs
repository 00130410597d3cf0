//! Requests accepted by the inbox handlers.

use crate::config::Streams;
use crate::key::{CopyTarget, ItemKey, ReplySlot};

/// Load every configured stream.
#[derive(Debug, Clone, Default)]
pub struct InitializeReq;

impl InitializeReq {
    pub const PATH: &'static str = "inbox/initialize";
}

/// Re-fetch streams without touching panels, cache or edits.
#[derive(Debug, Clone, Default)]
pub struct RefreshReq {
    pub streams: Streams,
}

impl RefreshReq {
    pub const PATH: &'static str = "inbox/refresh";
}

/// Expand or collapse one item's suggestion panel.
#[derive(Debug, Clone)]
pub struct ToggleSuggestionsReq {
    pub key: ItemKey,
}

impl ToggleSuggestionsReq {
    pub const PATH: &'static str = "suggestions/toggle";
}

#[derive(Debug, Clone)]
pub struct EditReplyReq {
    pub key: ItemKey,
    pub slot: ReplySlot,
    pub text: String,
}

impl EditReplyReq {
    pub const PATH: &'static str = "suggestions/edit";
}

#[derive(Debug, Clone)]
pub struct CopyReq {
    pub text: String,
    pub marker: CopyTarget,
}

impl CopyReq {
    pub const PATH: &'static str = "clipboard/copy";
}
