//! Echo inbox: Instagram comments and direct messages as one feed, with
//! AI reply suggestions fetched once per item.
//!
//! State lives in a Flux store under `inbox/...`; mutations are requests
//! routed to the handlers in [`handlers`]. [`InteractionFeed`] wraps both
//! for callers that prefer typed methods.

pub mod cache;
pub mod clipboard;
pub mod config;
pub mod feed;
pub mod handlers;
pub mod item;
pub mod key;
pub mod overlay;
pub mod request;
pub mod session;
pub mod state;

pub use clipboard::{Clipboard, ClipboardError, CommandClipboard, MemoryClipboard};
pub use config::{FeedConfig, Streams};
pub use feed::InteractionFeed;
pub use item::{InteractionItem, ItemDetail, format_relative, merge_and_sort, parse_timestamp};
pub use key::{CopyTarget, InteractionKind, ItemKey, ReplySlot};
pub use state::{CommentsState, CopiedState, ErrorBanner, MessagesState, PanelView};
