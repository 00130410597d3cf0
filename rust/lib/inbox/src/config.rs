use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default time the "copied" marker stays on.
pub const DEFAULT_COPIED_RESET_MS: u64 = 2000;

/// Which interaction streams the feed loads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Streams {
    #[default]
    Both,
    Comments,
    Messages,
}

impl Streams {
    pub fn comments(self) -> bool {
        matches!(self, Streams::Both | Streams::Comments)
    }

    pub fn messages(self) -> bool {
        matches!(self, Streams::Both | Streams::Messages)
    }
}

/// Feed behaviour knobs. Every field has a default, so an empty `[feed]`
/// table is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default)]
    pub streams: Streams,

    /// Upper bound on cached suggestion sets. Unset means unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion_capacity: Option<usize>,

    #[serde(default = "default_copied_reset_ms")]
    pub copied_reset_ms: u64,
}

fn default_copied_reset_ms() -> u64 {
    DEFAULT_COPIED_RESET_MS
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            streams: Streams::Both,
            suggestion_capacity: None,
            copied_reset_ms: DEFAULT_COPIED_RESET_MS,
        }
    }
}

impl FeedConfig {
    pub fn copied_reset(&self) -> Duration {
        Duration::from_millis(self.copied_reset_ms)
    }
}
