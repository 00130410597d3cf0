//! Flux: path-addressed UI state engine.
//!
//! Rust owns the state; a renderer reads it and re-renders on change.
//!
//! - `get_as(path)` reads typed state
//! - `emit(path, payload)` sends a typed request to matching handlers
//! - `subscribe(pattern, f)` observes state writes
//!
//! Paths use `/` as separator, e.g. `inbox/comments` or
//! `inbox/panel/comment/17`. Handler and subscription patterns accept
//! MQTT-style wildcards: `+` for one level, `#` for the rest.

pub mod app;
pub mod pattern;
pub mod router;
pub mod store;
pub mod value;

pub use app::Flux;
pub use pattern::Pattern;
pub use router::{BoxFuture, Payload, Router};
pub use store::{ChangeHandler, StateStore};
pub use value::{StateValue, SubscriptionId};
