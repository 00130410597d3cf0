//! Per-item panel state: expansion, in-flight fetches, cached suggestions
//! and edits.
//!
//! Pure and synchronous; the handlers hold it behind a mutex and never
//! across an await.

use std::collections::HashSet;
use std::sync::Arc;

use echo_client::SuggestionSet;

use crate::cache::SuggestionCache;
use crate::key::{ItemKey, ReplySlot};
use crate::overlay::EditOverlay;
use crate::state::PanelView;

/// What a toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Collapsed,
    /// Expanded over an already cached set.
    ExpandedCached,
    /// Expanded while a fetch for the key is still outstanding.
    ExpandedInFlight,
    /// Expanded and marked in flight; the caller must issue the fetch and
    /// report back through [`Session::finish_fetch`].
    FetchStarted,
}

pub struct Session {
    expanded: HashSet<ItemKey>,
    in_flight: HashSet<ItemKey>,
    cache: SuggestionCache,
    edits: EditOverlay,
}

impl Session {
    pub fn new(suggestion_capacity: Option<usize>) -> Self {
        Self {
            expanded: HashSet::new(),
            in_flight: HashSet::new(),
            cache: SuggestionCache::new(suggestion_capacity),
            edits: EditOverlay::new(),
        }
    }

    pub fn toggle(&mut self, key: &ItemKey) -> ToggleOutcome {
        if self.expanded.remove(key) {
            return ToggleOutcome::Collapsed;
        }
        self.expanded.insert(key.clone());
        if self.cache.touch(key) {
            ToggleOutcome::ExpandedCached
        } else if !self.in_flight.insert(key.clone()) {
            ToggleOutcome::ExpandedInFlight
        } else {
            ToggleOutcome::FetchStarted
        }
    }

    /// Complete a fetch begun by `toggle`. `None` means it failed and the
    /// key stays uncached. Returns a key evicted from a bounded cache;
    /// expanded keys are never evicted.
    pub fn finish_fetch(&mut self, key: &ItemKey, result: Option<SuggestionSet>) -> Option<ItemKey> {
        self.in_flight.remove(key);
        let expanded = &self.expanded;
        let evicted = self
            .cache
            .insert(key.clone(), result?, |k| expanded.contains(k));
        if let Some(evicted) = &evicted {
            self.edits.remove_item(evicted);
        }
        evicted
    }

    pub fn is_expanded(&self, key: &ItemKey) -> bool {
        self.expanded.contains(key)
    }

    /// A suggestion request for `key` is outstanding.
    pub fn is_loading(&self, key: &ItemKey) -> bool {
        self.in_flight.contains(key)
    }

    pub fn suggestions(&self, key: &ItemKey) -> Option<Arc<SuggestionSet>> {
        self.cache.get(key)
    }

    pub fn edit(&mut self, key: ItemKey, slot: ReplySlot, text: String) {
        self.edits.set(key, slot, text);
    }

    pub fn display_text<'a>(&'a self, key: &ItemKey, slot: ReplySlot, original: &'a str) -> &'a str {
        self.edits.display_text(key, slot, original)
    }

    /// Displayed text of a slot of the cached set, edits applied.
    pub fn reply_text(&self, key: &ItemKey, slot: ReplySlot) -> Option<String> {
        let set = self.cache.get(key)?;
        let original = match slot {
            ReplySlot::Main => set.primary.text.as_str(),
            ReplySlot::Alternative(i) => set.alternatives.get(i)?.text.as_str(),
        };
        Some(self.display_text(key, slot, original).to_string())
    }

    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }

    /// Snapshot of `key`'s panel for publishing.
    pub fn panel(&self, key: &ItemKey) -> PanelView {
        let suggestions = self.cache.get(key);
        let (main_text, alternative_texts) = match &suggestions {
            Some(set) => (
                Some(self.display_text(key, ReplySlot::Main, &set.primary.text).to_string()),
                set.alternatives
                    .iter()
                    .enumerate()
                    .map(|(i, alt)| {
                        self.display_text(key, ReplySlot::Alternative(i), &alt.text)
                            .to_string()
                    })
                    .collect(),
            ),
            None => (None, Vec::new()),
        };
        PanelView {
            key: key.clone(),
            expanded: self.is_expanded(key),
            loading: self.is_loading(key),
            suggestions,
            main_text,
            alternative_texts,
        }
    }
}
