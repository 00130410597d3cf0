//! State published to the Flux store.
//!
//! A UI reads these by path (or subscribes to `inbox/#`) and renders them
//! verbatim.

use std::sync::Arc;

use echo_client::{CommentItem, MessageItem, SuggestionSet};

use crate::key::{CopyTarget, ItemKey};

/// Latest comments as delivered, with their "new" flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentsState {
    pub items: Vec<(CommentItem, bool)>,
    pub loading: bool,
    /// The backend served sample data instead of live comments.
    pub sample_data: bool,
}

impl CommentsState {
    pub const PATH: &'static str = "inbox/comments";

    pub fn post_id_of(&self, comment_id: &str) -> Option<String> {
        self.items
            .iter()
            .find(|(c, _)| c.id == comment_id)
            .and_then(|(c, _)| c.post_id.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessagesState {
    pub items: Vec<(MessageItem, bool)>,
    pub loading: bool,
}

impl MessagesState {
    pub const PATH: &'static str = "inbox/messages";
}

/// One banner shared by every failing operation; the last failure wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorBanner(pub Option<String>);

impl ErrorBanner {
    pub const PATH: &'static str = "inbox/error";
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopiedState {
    pub marker: Option<CopyTarget>,
    /// Bumped on every successful copy; a reset timer only clears the
    /// marker it was started for.
    pub generation: u64,
}

impl CopiedState {
    pub const PATH: &'static str = "inbox/copied";
}

/// Render state of one item's suggestion panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    pub key: ItemKey,
    pub expanded: bool,
    pub loading: bool,
    pub suggestions: Option<Arc<SuggestionSet>>,
    /// Displayed primary reply, edits applied.
    pub main_text: Option<String>,
    pub alternative_texts: Vec<String>,
}

impl PanelView {
    pub const PREFIX: &'static str = "inbox/panel/";

    /// `inbox/panel/<kind>/<id>`. The id is percent-escaped so it always
    /// fills exactly one path level.
    pub fn path(key: &ItemKey) -> String {
        format!("{}{}/{}", Self::PREFIX, key.kind, escape_segment(&key.id))
    }
}

fn escape_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '%' => out.push_str("%25"),
            '/' => out.push_str("%2F"),
            '+' => out.push_str("%2B"),
            '#' => out.push_str("%23"),
            c => out.push(c),
        }
    }
    out
}
