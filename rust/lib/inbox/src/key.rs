//! Structured keys for per-item state.
//!
//! Comment and message ids live in separate namespaces, so every map is
//! keyed by `(kind, id)`; reply slots are an enum rather than a suffix.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    Comment,
    Message,
}

impl InteractionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionKind::Comment => "comment",
            InteractionKind::Message => "message",
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InteractionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "comment" | "comments" => Ok(InteractionKind::Comment),
            "message" | "messages" | "dm" => Ok(InteractionKind::Message),
            other => Err(format!("unknown interaction kind '{}'", other)),
        }
    }
}

/// Identity of one feed item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemKey {
    pub kind: InteractionKind,
    pub id: String,
}

impl ItemKey {
    pub fn new(kind: InteractionKind, id: impl Into<String>) -> Self {
        Self { kind, id: id.into() }
    }

    pub fn comment(id: impl Into<String>) -> Self {
        Self::new(InteractionKind::Comment, id)
    }

    pub fn message(id: impl Into<String>) -> Self {
        Self::new(InteractionKind::Message, id)
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// Which reply of a suggestion set: the primary one or an alternative by
/// position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplySlot {
    Main,
    Alternative(usize),
}

impl fmt::Display for ReplySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplySlot::Main => f.write_str("main"),
            ReplySlot::Alternative(i) => write!(f, "{}", i),
        }
    }
}

impl FromStr for ReplySlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "main" {
            return Ok(ReplySlot::Main);
        }
        s.parse::<usize>()
            .map(ReplySlot::Alternative)
            .map_err(|_| format!("reply slot must be 'main' or an index, got '{}'", s))
    }
}

/// What was copied last: one reply slot of one item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CopyTarget {
    pub key: ItemKey,
    pub slot: ReplySlot,
}

impl CopyTarget {
    pub fn new(key: ItemKey, slot: ReplySlot) -> Self {
        Self { key, slot }
    }
}

impl fmt::Display for CopyTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.key, self.slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn same_id_different_kind_are_distinct() {
        let mut keys = HashSet::new();
        keys.insert(ItemKey::comment("5"));
        keys.insert(ItemKey::message("5"));
        keys.insert(ItemKey::comment("5"));
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn main_slot_never_equals_an_index() {
        assert_ne!(ReplySlot::Main, ReplySlot::Alternative(0));
        assert_eq!("main".parse::<ReplySlot>(), Ok(ReplySlot::Main));
        assert_eq!("2".parse::<ReplySlot>(), Ok(ReplySlot::Alternative(2)));
        assert!("second".parse::<ReplySlot>().is_err());
    }

    #[test]
    fn kind_parses_cli_spellings() {
        assert_eq!("comment".parse(), Ok(InteractionKind::Comment));
        assert_eq!("dm".parse(), Ok(InteractionKind::Message));
        assert!("story".parse::<InteractionKind>().is_err());
    }

    #[test]
    fn display_forms() {
        assert_eq!(ItemKey::message("m1").to_string(), "message:m1");
        assert_eq!(ReplySlot::Alternative(3).to_string(), "3");
        assert_eq!(ReplySlot::Main.to_string(), "main");
    }
}
