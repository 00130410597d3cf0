use std::collections::HashMap;

use crate::key::{ItemKey, ReplySlot};

/// Local, unsent edits of suggested replies.
///
/// An edit shadows the fetched text for display and copy; the fetched
/// suggestion set itself is never touched.
#[derive(Debug, Default)]
pub struct EditOverlay {
    edits: HashMap<(ItemKey, ReplySlot), String>,
}

impl EditOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the edit for a slot. Empty text is a valid edit.
    pub fn set(&mut self, key: ItemKey, slot: ReplySlot, text: String) {
        self.edits.insert((key, slot), text);
    }

    pub fn get(&self, key: &ItemKey, slot: ReplySlot) -> Option<&str> {
        self.edits.get(&(key.clone(), slot)).map(String::as_str)
    }

    /// The edit if present, else `original`.
    pub fn display_text<'a>(&'a self, key: &ItemKey, slot: ReplySlot, original: &'a str) -> &'a str {
        self.get(key, slot).unwrap_or(original)
    }

    /// Drop every slot's edit for `key`.
    pub fn remove_item(&mut self, key: &ItemKey) {
        self.edits.retain(|(k, _), _| k != key);
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }
}
